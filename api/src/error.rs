//! Error types for the backend client

use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// An authenticated operation was attempted without a session token
    #[error("No session token - log in first")]
    MissingToken,

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body did not match the expected shape
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - token missing, expired, or invalid credentials
    #[error("Unauthorized - invalid or expired credentials")]
    Unauthorized,

    /// Backend returned a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// A list endpoint that must yield an element returned none
    #[error("{0} returned an empty list")]
    EmptyCollection(String),

    /// An upload could not be turned into a multipart part
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}
