//! Durable Contact Collection
//!
//! Keeps contacts as JSON documents in a single file. The in-process view is two
//! `DashMap`s: the documents keyed by UUID, and a unique index from name to UUID.
//!
//! ## Guarantees
//! - **Unique names**: `create` claims the name through the index's entry API, which is
//!   atomic per key. A claim that finds an occupied entry is reported as `Conflict`.
//! - **Native identities**: Every document gets a fresh UUID v4; the store never asks the
//!   caller for one.
//! - **Persistence**: Each mutation rewrites the file through a temp file and a rename, so
//!   a crash leaves either the old or the new collection on disk. A failed write rolls the
//!   in-process change back and surfaces as `Unavailable`.
//! - **Serialized writers**: Every mutation holds `write_lock` from its first map change
//!   until its file write (and any rollback) is done. A rollback therefore restores a state
//!   no other writer has touched. Reads never take the lock.

use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::error::StoreError;
use super::store::ContactStore;
use super::types::{Contact, ContactId, NewContact, validate_number};

/// On-disk shape of one contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContactDocument {
    id: Uuid,
    name: String,
    number: String,
}

#[derive(Debug, Clone)]
struct StoredContact {
    seq: u64,
    name: String,
    number: String,
}

impl StoredContact {
    fn to_contact(&self, id: Uuid) -> Contact {
        Contact {
            id: ContactId(id.to_string()),
            name: self.name.clone(),
            number: self.number.clone(),
        }
    }
}

pub struct DocumentStore {
    path: PathBuf,
    documents: DashMap<Uuid, StoredContact>,
    name_index: DashMap<String, Uuid>,
    next_seq: AtomicU64,
    /// Held by each mutation across its map changes, file write and rollback.
    pub(super) write_lock: Mutex<()>,
}

impl DocumentStore {
    /// Opens the collection at `path`, creating it on first write if it does not exist.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let store = Self {
            path,
            documents: DashMap::new(),
            name_index: DashMap::new(),
            next_seq: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        };

        let raw = match tokio::fs::read(&store.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No contact file at {}, starting empty",
                    store.path.display()
                );
                return Ok(store);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", store.path.display()));
            }
        };

        let documents: Vec<ContactDocument> = serde_json::from_slice(&raw)
            .with_context(|| format!("parsing {}", store.path.display()))?;

        for doc in documents {
            if doc.name.is_empty() || doc.number.is_empty() {
                anyhow::bail!(
                    "contact {} in {} has an empty field",
                    doc.id,
                    store.path.display()
                );
            }
            if store.name_index.insert(doc.name.clone(), doc.id).is_some() {
                anyhow::bail!(
                    "duplicate contact name {:?} in {}",
                    doc.name,
                    store.path.display()
                );
            }
            let seq = store.next_seq.fetch_add(1, Ordering::SeqCst);
            let stored = StoredContact {
                seq,
                name: doc.name,
                number: doc.number,
            };
            if store.documents.insert(doc.id, stored).is_some() {
                anyhow::bail!(
                    "duplicate contact id {} in {}",
                    doc.id,
                    store.path.display()
                );
            }
        }

        tracing::info!(
            "Loaded {} contacts from {}",
            store.documents.len(),
            store.path.display()
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_id(id: &ContactId) -> Result<Uuid, StoreError> {
        Uuid::parse_str(id.as_str()).map_err(|_| StoreError::MalformedId(id.to_string()))
    }

    fn snapshot(&self) -> Vec<(Uuid, StoredContact)> {
        let mut entries: Vec<(Uuid, StoredContact)> = self
            .documents
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(_, stored)| stored.seq);
        entries
    }

    /// Rewrites the file from the current maps. Callers hold `write_lock`.
    async fn flush(&self) -> Result<(), StoreError> {
        let documents: Vec<ContactDocument> = self
            .snapshot()
            .into_iter()
            .map(|(id, stored)| ContactDocument {
                id,
                name: stored.name,
                number: stored.number,
            })
            .collect();
        let bytes = serde_json::to_vec_pretty(&documents).map_err(StoreError::unavailable)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("writing {}", tmp.display()))
            .map_err(StoreError::Unavailable)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))
            .map_err(StoreError::Unavailable)?;

        Ok(())
    }
}

#[async_trait]
impl ContactStore for DocumentStore {
    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self
            .snapshot()
            .into_iter()
            .map(|(id, stored)| stored.to_contact(id))
            .collect())
    }

    async fn get(&self, id: &ContactId) -> Result<Contact, StoreError> {
        let key = Self::parse_id(id)?;
        self.documents
            .get(&key)
            .map(|stored| stored.to_contact(key))
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, StoreError> {
        contact.validate()?;
        let _writer = self.write_lock.lock().await;

        let id = Uuid::new_v4();
        match self.name_index.entry(contact.name.clone()) {
            Entry::Occupied(_) => return Err(StoreError::Conflict { name: contact.name }),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let stored = StoredContact {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            name: contact.name,
            number: contact.number,
        };
        let created = stored.to_contact(id);
        self.documents.insert(id, stored);

        if let Err(e) = self.flush().await {
            tracing::error!("Failed to persist new contact {}: {}", id, e);
            self.documents.remove(&id);
            self.name_index.remove_if(&created.name, |_, owner| *owner == id);
            return Err(e);
        }

        tracing::info!("Created contact {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update(&self, id: &ContactId, number: String) -> Result<Contact, StoreError> {
        validate_number(&number)?;
        let key = Self::parse_id(id)?;
        let _writer = self.write_lock.lock().await;

        let (previous, updated) = {
            let mut stored = self.documents.get_mut(&key).ok_or(StoreError::NotFound)?;
            let previous = std::mem::replace(&mut stored.number, number);
            (previous, stored.to_contact(key))
        };

        if let Err(e) = self.flush().await {
            tracing::error!("Failed to persist update of contact {}: {}", key, e);
            if let Some(mut stored) = self.documents.get_mut(&key) {
                stored.number = previous;
            }
            return Err(e);
        }

        tracing::info!("Updated number of contact {}", key);
        Ok(updated)
    }

    async fn delete(&self, id: &ContactId) -> Result<(), StoreError> {
        let key = Self::parse_id(id)?;
        let _writer = self.write_lock.lock().await;

        let (_, removed) = self.documents.remove(&key).ok_or(StoreError::NotFound)?;
        self.name_index.remove_if(&removed.name, |_, owner| *owner == key);

        if let Err(e) = self.flush().await {
            tracing::error!("Failed to persist deletion of contact {}: {}", key, e);
            if let Entry::Vacant(slot) = self.name_index.entry(removed.name.clone()) {
                slot.insert(key);
                self.documents.insert(key, removed);
            } else {
                tracing::error!(
                    "Name {:?} was reclaimed, contact {} stays deleted",
                    removed.name,
                    key
                );
            }
            return Err(e);
        }

        tracing::info!("Deleted contact {}", key);
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.documents.len())
    }
}
