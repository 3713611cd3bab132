//! Contact Store Module
//!
//! Owns the collection of contact records and the rules that keep it consistent.
//!
//! ## Core Concepts
//! - **Uniqueness**: At most one live contact per exact (case-sensitive) name. Each backing
//!   enforces this atomically inside the store, so two concurrent creates for one name
//!   cannot both succeed.
//! - **Identity**: Assigned once at creation and never reissued by the same store instance.
//!   `MemoryStore` draws integers by rejection sampling; `DocumentStore` uses UUIDs.
//! - **Classification**: Every failure leaves the store as a `StoreError` variant. Callers
//!   branch on the variant and never see backend-specific error shapes.
//!
//! ## Submodules
//! - **`types`**: `Contact`, `ContactId` and the validated `NewContact` payload.
//! - **`error`**: The closed `StoreError` taxonomy.
//! - **`store`**: The `ContactStore` trait shared by all backings.
//! - **`memory`**: Ephemeral ordered in-memory backing.
//! - **`document`**: Durable JSON document collection backing.

pub mod document;
pub mod error;
pub mod memory;
pub mod store;
pub mod types;

pub use document::DocumentStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{ContactStore, SharedStore};
pub use types::{Contact, ContactId, NewContact};
