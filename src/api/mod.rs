//! HTTP API Module
//!
//! Thin axum adapters over a `ContactStore`. Handlers check payload shape, delegate to
//! the store and translate the outcome into a status code and JSON body.
//!
//! ## Submodules
//! - **`protocol`**: Request and response bodies, and the route paths.
//! - **`error`**: `ApiError`, the single place where store outcomes become HTTP responses.
//! - **`handlers`**: One async function per operation.
//! - **`router`**: Wires handlers, the shared store and the tower-http layers together.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod router;

pub use router::build_router;
