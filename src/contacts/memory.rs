use async_trait::async_trait;
use rand::Rng;
use std::collections::HashSet;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::store::ContactStore;
use super::types::{Contact, ContactId, NewContact, validate_number};

/// Upper bound (exclusive) of the identity space.
pub const ID_SPACE: u32 = 1_000_000;

/// How many candidates `create` draws before giving up.
pub const MAX_ID_DRAWS: usize = 64;

#[derive(Default)]
struct MemoryState {
    contacts: Vec<(u32, Contact)>,
    retired: HashSet<u32>,
}

impl MemoryState {
    fn is_taken(&self, candidate: u32) -> bool {
        self.retired.contains(&candidate) || self.contacts.iter().any(|(id, _)| *id == candidate)
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.contacts.iter().position(|(key, _)| *key == id)
    }
}

/// Ephemeral backing: an ordered sequence of contacts behind one lock.
///
/// The name check, identity draw and insert happen under a single write guard,
/// so uniqueness holds under concurrent creates.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    id_space: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_id_space(ID_SPACE)
    }

    /// A store drawing identities from `[0, id_space)`.
    pub fn with_id_space(id_space: u32) -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            id_space: id_space.max(1),
        }
    }

    fn parse_id(id: &ContactId) -> Result<u32, StoreError> {
        id.as_str()
            .parse::<u32>()
            .map_err(|_| StoreError::MalformedId(id.to_string()))
    }

    fn draw_id(&self) -> u32 {
        rand::thread_rng().gen_range(0..self.id_space)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        let state = self.state.read().await;
        Ok(state.contacts.iter().map(|(_, c)| c.clone()).collect())
    }

    async fn get(&self, id: &ContactId) -> Result<Contact, StoreError> {
        let key = Self::parse_id(id)?;
        let state = self.state.read().await;
        state
            .position(key)
            .map(|idx| state.contacts[idx].1.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, StoreError> {
        contact.validate()?;

        let mut state = self.state.write().await;
        if state.contacts.iter().any(|(_, c)| c.name == contact.name) {
            return Err(StoreError::Conflict { name: contact.name });
        }

        let key = (0..MAX_ID_DRAWS)
            .map(|_| self.draw_id())
            .find(|candidate| !state.is_taken(*candidate))
            .ok_or_else(|| {
                tracing::error!("No free identity after {} draws", MAX_ID_DRAWS);
                StoreError::unavailable(anyhow::anyhow!("identity space exhausted"))
            })?;

        let created = Contact {
            id: ContactId(key.to_string()),
            name: contact.name,
            number: contact.number,
        };
        state.contacts.push((key, created.clone()));
        tracing::info!("Created contact {} ({})", created.id, created.name);

        Ok(created)
    }

    async fn update(&self, id: &ContactId, number: String) -> Result<Contact, StoreError> {
        validate_number(&number)?;
        let key = Self::parse_id(id)?;

        let mut state = self.state.write().await;
        let idx = state.position(key).ok_or(StoreError::NotFound)?;
        let contact = &mut state.contacts[idx].1;
        contact.number = number;
        tracing::info!("Updated number of contact {}", contact.id);

        Ok(contact.clone())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), StoreError> {
        let key = Self::parse_id(id)?;

        let mut state = self.state.write().await;
        let len_before = state.contacts.len();
        state.contacts.retain(|(k, _)| *k != key);
        let len_after = state.contacts.len();
        tracing::debug!(
            "Contacts before delete: {}, after: {}",
            len_before,
            len_after
        );

        if len_before == len_after {
            return Err(StoreError::NotFound);
        }
        state.retired.insert(key);
        tracing::info!("Deleted contact {}", id);

        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.state.read().await.contacts.len())
    }
}
