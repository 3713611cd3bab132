//! Phonebook Service Library
//!
//! A small directory service storing named contacts (a unique name and a phone number)
//! behind an HTTP/JSON API. The binaries (`main.rs`, `bin/phonebook-admin.rs`) are thin
//! shells over this crate.
//!
//! ## Modules
//! - **`contacts`**: The contact store. Defines the `ContactStore` contract, the closed
//!   `StoreError` taxonomy and two backings (`MemoryStore`, `DocumentStore`). All
//!   invariants (unique names, fresh identities) are enforced here.
//! - **`api`**: axum handlers that validate payload shape, call the store and map its
//!   outcomes onto status codes.
//! - **`config`**: Environment-driven startup configuration.
//! - **`admin`**: Maintenance commands behind the `phonebook-admin` binary.

pub mod admin;
pub mod api;
pub mod config;
pub mod contacts;

use std::sync::Arc;

use config::{Backend, Config};
use contacts::{DocumentStore, MemoryStore, SharedStore};

/// Constructs the store selected by `config`.
pub async fn open_store(config: &Config) -> anyhow::Result<SharedStore> {
    let store: SharedStore = match config.backend {
        Backend::Memory => Arc::new(MemoryStore::new()),
        Backend::Document => Arc::new(DocumentStore::open(&config.data_file).await?),
    };
    Ok(store)
}
