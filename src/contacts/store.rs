use async_trait::async_trait;
use std::sync::Arc;

use super::error::StoreError;
use super::types::{Contact, ContactId, NewContact};

/// Shared handle injected into the HTTP layer.
pub type SharedStore = Arc<dyn ContactStore>;

/// The contract every contact backing implements.
///
/// Each operation is atomic with respect to the uniqueness and identity
/// invariants: no caller can observe two live contacts with one name or one id.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All live contacts, oldest first.
    async fn list(&self) -> Result<Vec<Contact>, StoreError>;

    async fn get(&self, id: &ContactId) -> Result<Contact, StoreError>;

    /// Validates, claims the name and assigns a fresh identity in one step.
    async fn create(&self, contact: NewContact) -> Result<Contact, StoreError>;

    /// Replaces `number` only. Returns the record after the change.
    async fn update(&self, id: &ContactId, number: String) -> Result<Contact, StoreError>;

    async fn delete(&self, id: &ContactId) -> Result<(), StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}
