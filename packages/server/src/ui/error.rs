//! HTTP error taxonomy.
//!
//! Every failure ends the request with a bare status code:
//!
//! | variant        | status |
//! |----------------|--------|
//! | `InvalidInput` | 422    |
//! | `Conflict`     | 409    |
//! | `NotFound`     | 404    |
//! | `Internal`     | 500    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::{RepositoryError, ValidationError},
    usecase::{KeepAliveError, PostMessageError, RegisterParticipantError},
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(_) => tracing::error!("{}", self),
            _ => tracing::debug!("Request rejected: {}", self),
        }
        self.status_code().into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateName(_) => Self::Conflict(err.to_string()),
            RepositoryError::Unavailable(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<RegisterParticipantError> for ApiError {
    fn from(err: RegisterParticipantError) -> Self {
        match err {
            RegisterParticipantError::DuplicateName(_) => Self::Conflict(err.to_string()),
            RegisterParticipantError::Repository(e) => e.into(),
        }
    }
}

impl From<KeepAliveError> for ApiError {
    fn from(err: KeepAliveError) -> Self {
        match err {
            KeepAliveError::ParticipantNotFound(_) => Self::NotFound(err.to_string()),
            KeepAliveError::Repository(e) => e.into(),
        }
    }
}

impl From<PostMessageError> for ApiError {
    fn from(err: PostMessageError) -> Self {
        match err {
            PostMessageError::UnknownSender(_) => Self::InvalidInput(err.to_string()),
            PostMessageError::Repository(e) => e.into(),
        }
    }
}
