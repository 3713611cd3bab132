use thiserror::Error;

/// Every way a contact store operation can fail.
///
/// The set is closed: backings map their own failures onto these variants once,
/// and handlers only ever match on them.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required field is missing or empty. The message names the field.
    #[error("{0}")]
    Validation(String),

    /// A live contact already holds this name.
    #[error("contact named {name:?} already exists")]
    Conflict { name: String },

    /// The identity is well-formed but no live contact has it.
    #[error("contact not found")]
    NotFound,

    /// The identity cannot be interpreted by this backing at all.
    #[error("malformed contact id {0:?}")]
    MalformedId(String),

    /// The backing failed in a way callers cannot act on.
    #[error("contact store unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
}

impl StoreError {
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        Self::Unavailable(err.into())
    }
}
