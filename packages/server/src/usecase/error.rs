//! UseCase error types.

use thiserror::Error;

use crate::domain::RepositoryError;

/// Participant registration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterParticipantError {
    /// The name is already registered
    #[error("participant '{0}' already exists")]
    DuplicateName(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for RegisterParticipantError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateName(name) => Self::DuplicateName(name),
            other => Self::Repository(other),
        }
    }
}

/// Keep-alive errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeepAliveError {
    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Message posting errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostMessageError {
    /// The sender is not a registered participant
    #[error("sender '{0}' is not a participant")]
    UnknownSender(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Sweep errors. Only the snapshot read aborts a sweep; failures on
/// individual participants are reported in `SweepReport`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("failed to read inactive participants: {0}")]
    Snapshot(#[source] RepositoryError),
}
