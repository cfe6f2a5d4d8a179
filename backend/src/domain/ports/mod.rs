//! Domain ports: the driven edges the HTTP adapter talks to.

mod macros;
pub(crate) use macros::define_port_error;

mod client_repository;
mod sales_ledger;
mod subscription_gateway;

#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use client_repository::{ClientRepository, ClientRepositoryError, FixtureClientRepository};
#[cfg(test)]
pub use sales_ledger::MockSalesLedger;
pub use sales_ledger::{FixtureSalesLedger, SalesLedger, SalesLedgerError};
#[cfg(test)]
pub use subscription_gateway::MockSubscriptionGateway;
pub use subscription_gateway::{
    FixtureSubscriptionGateway, SubscriptionGateway, SubscriptionGatewayError,
};
