//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only talk to domain ports,
//! so they can be exercised without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{ClientRepository, SalesLedger, SubscriptionGateway};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub clients: Arc<dyn ClientRepository>,
    pub sales: Arc<dyn SalesLedger>,
    pub subscriptions: Arc<dyn SubscriptionGateway>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        sales: Arc<dyn SalesLedger>,
        subscriptions: Arc<dyn SubscriptionGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            clients,
            sales,
            subscriptions,
            clock,
        }
    }
}
