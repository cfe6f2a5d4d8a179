//! Port for client registration and lookup.

use async_trait::async_trait;

use crate::domain::{Client, ClientId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by client repository adapters.
    pub enum ClientRepositoryError {
        /// A client with the same email is already registered.
        DuplicateEmail { email: String } =>
            "client with email {email} is already registered",
        /// The backing store failed to serve the request.
        Unavailable { message: String } =>
            "client repository unavailable: {message}",
    }
}

/// Port for storing and finding clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Persist a newly registered client.
    async fn save(&self, client: &Client) -> Result<(), ClientRepositoryError>;

    /// Find a client by id.
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, ClientRepositoryError>;
}

/// Fixture implementation for tests that never find anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClientRepository;

#[async_trait]
impl ClientRepository for FixtureClientRepository {
    async fn save(&self, _client: &Client) -> Result<(), ClientRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &ClientId) -> Result<Option<Client>, ClientRepositoryError> {
        Ok(None)
    }
}
