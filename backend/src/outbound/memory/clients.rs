//! Client directory held in memory.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::ports::{ClientRepository, ClientRepositoryError};
use crate::domain::{Client, ClientId};

/// Concurrent client directory with a unique email index.
#[derive(Debug, Default)]
pub struct InMemoryClientDirectory {
    clients: DashMap<ClientId, Client>,
    emails: DashMap<String, ClientId>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientDirectory {
    async fn save(&self, client: &Client) -> Result<(), ClientRepositoryError> {
        // The email slot is claimed first so two concurrent registrations
        // with one address cannot both succeed.
        match self.emails.entry(client.email().to_owned()) {
            Entry::Occupied(existing) if *existing.get() != client.id() => {
                return Err(ClientRepositoryError::duplicate_email(client.email()));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(client.id());
            }
        }
        self.clients.insert(client.id(), client.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, ClientRepositoryError> {
        Ok(self.clients.get(id).map(|entry| entry.value().clone()))
    }
}
