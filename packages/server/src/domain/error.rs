//! Domain error types.

use thiserror::Error;

/// Value object construction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("participant name must not be empty")]
    EmptyName,

    #[error("recipient must not be empty")]
    EmptyRecipient,

    #[error("message text must not be empty")]
    EmptyText,

    #[error("unsupported message type '{0}'")]
    UnsupportedMessageKind(String),

    #[error("limit must be a positive integer, got '{0}'")]
    InvalidLimit(String),
}

/// Data store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A participant with the same name is already stored
    #[error("participant '{0}' already exists")]
    DuplicateName(String),

    /// The store could not serve the request
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
