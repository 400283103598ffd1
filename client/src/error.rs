//! Error types for the client

use crate::views::forms::FormErrors;
use fscomics_api::ApiError;
use fscomics_core::environment::SessionError;
use fscomics_runtime::StoreError;
use thiserror::Error;

/// Why a single backend request failed
///
/// Carried inside the slices' `RequestFailed` actions, so it is cheap to
/// clone and compare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Backend call failed, or no token was stored
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session token storage failed
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl RequestError {
    /// Whether the backend refused the session, or there was none to send
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized | ApiError::MissingToken))
    }
}

/// Errors surfaced by the client workflows
#[derive(Error, Debug)]
pub enum ClientError {
    /// Session token storage failed
    #[error("Session storage failed: {0}")]
    Session(#[from] SessionError),

    /// Store rejected an action or a completion did not arrive in time
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Form input failed client-side validation; nothing was sent
    #[error("Invalid input: {0}")]
    Validation(#[from] FormErrors),

    /// A request completed with a failure
    #[error("{operation} was rejected: {error}")]
    Rejected {
        /// Operation that failed
        operation: String,
        /// Failure reported by the effect
        error: RequestError,
    },

    /// The same operation is still running; nothing was sent
    #[error("{0} is already in progress")]
    InProgress(String),

    /// Referenced entity is not in the cached state
    #[error("{0} not found")]
    NotFound(String),

    /// A completion of an unexpected shape was observed
    #[error("Unexpected completion: {0}")]
    UnexpectedAction(String),
}

impl ClientError {
    /// Whether the failure came from the backend rejecting the session
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { error, .. } if error.is_unauthorized())
    }
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}
