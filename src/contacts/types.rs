use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::StoreError;

pub const MSG_NAME_MISSING: &str = "Name must be present";
pub const MSG_NUMBER_MISSING: &str = "Number must be present";

/// Opaque identity of a contact as seen by clients.
///
/// Each backing decides which strings are well-formed identities. Parsing a
/// `ContactId` into a backend key is the store's job, see `StoreError::MalformedId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl ContactId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// A live record in the phonebook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub number: String,
}

/// Input for `ContactStore::create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub number: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Rejects empty fields. `number` is checked before `name`.
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_number(&self.number)?;
        if self.name.is_empty() {
            return Err(StoreError::Validation(MSG_NAME_MISSING.to_string()));
        }
        Ok(())
    }
}

pub fn validate_number(number: &str) -> Result<(), StoreError> {
    if number.is_empty() {
        return Err(StoreError::Validation(MSG_NUMBER_MISSING.to_string()));
    }
    Ok(())
}
