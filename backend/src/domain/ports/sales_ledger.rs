//! Port for recorded sales.

use async_trait::async_trait;

use crate::domain::{DateRange, Sale};

use super::define_port_error;

define_port_error! {
    /// Errors raised by sales ledger adapters.
    pub enum SalesLedgerError {
        /// The backing store failed to serve the request.
        Unavailable { message: String } =>
            "sales ledger unavailable: {message}",
    }
}

/// Port for appending sales and reading them back by day.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalesLedger: Send + Sync {
    /// Append a sale.
    async fn record(&self, sale: &Sale) -> Result<(), SalesLedgerError>;

    /// Sales whose `sold_on` day falls inside `range`.
    async fn sales_between(&self, range: &DateRange) -> Result<Vec<Sale>, SalesLedgerError>;
}

/// Fixture implementation holding no sales.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSalesLedger;

#[async_trait]
impl SalesLedger for FixtureSalesLedger {
    async fn record(&self, _sale: &Sale) -> Result<(), SalesLedgerError> {
        Ok(())
    }

    async fn sales_between(&self, _range: &DateRange) -> Result<Vec<Sale>, SalesLedgerError> {
        Ok(Vec::new())
    }
}
