//! Port handing subscription commands to the billing collaborator.

use async_trait::async_trait;

use crate::domain::{ClientId, SubscriptionCommand};

use super::define_port_error;

define_port_error! {
    /// Errors raised by billing gateways.
    pub enum SubscriptionGatewayError {
        /// Billing could not be reached.
        Unavailable { message: String } =>
            "subscription gateway unavailable: {message}",
    }
}

/// Port for submitting lifecycle commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionGateway: Send + Sync {
    /// Submit `command` for `client_id`.
    async fn submit(
        &self,
        client_id: &ClientId,
        command: &SubscriptionCommand,
    ) -> Result<(), SubscriptionGatewayError>;
}

/// Gateway that accepts every command without forwarding it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionGateway;

#[async_trait]
impl SubscriptionGateway for FixtureSubscriptionGateway {
    async fn submit(
        &self,
        client_id: &ClientId,
        command: &SubscriptionCommand,
    ) -> Result<(), SubscriptionGatewayError> {
        tracing::info!(%client_id, action = %command.action(), "subscription command accepted");
        Ok(())
    }
}
