//! HTTP Protocol Definitions
//!
//! Route paths, request/response bodies and the error messages clients see.
//! Every error body has the shape `{"error": "<message>"}`.

use serde::{Deserialize, Serialize};

pub use crate::contacts::types::{MSG_NAME_MISSING, MSG_NUMBER_MISSING};

/// Collection route: list (GET) and create (POST).
pub const ENDPOINT_PERSONS: &str = "/api/persons";
/// Single-contact route: get (GET), update number (PUT), delete (DELETE).
pub const ENDPOINT_PERSON: &str = "/api/persons/:id";
/// Human-readable status page.
pub const ENDPOINT_INFO: &str = "/info";

/// Body is empty, not JSON, or not a JSON object.
pub const MSG_MISSING_PAYLOAD: &str = "Request must have JSON payload";
/// Create hit a name held by a live contact.
pub const MSG_DUPLICATE_NAME: &str = "Person already exists in phonebook";
/// The path id is not an identity for the active backing.
pub const MSG_MALFORMED_ID: &str = "malformatted id";
/// No route matched.
pub const MSG_UNKNOWN_ENDPOINT: &str = "unknown endpoint";
/// The store failed; details are only logged.
pub const MSG_INTERNAL: &str = "internal server error";

/// Body of `POST /api/persons`. Fields are optional so absence can be reported by name.
#[derive(Debug, Default, Deserialize)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}

/// Body of `PUT /api/persons/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateContactRequest {
    pub number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
