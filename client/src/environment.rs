//! Injected dependencies shared by both slices.

use crate::error::RequestError;
use fscomics_api::{ApiError, BackendApi};
use fscomics_core::environment::SessionStore;

/// Environment for the auth and review reducers
///
/// # Type Parameters
///
/// - `B`: Backend implementation (HTTP client in production, mock in tests)
/// - `S`: Session token holder
#[derive(Debug, Clone)]
pub struct AppEnvironment<B, S> {
    /// Backend the effects talk to
    pub api: B,
    /// Where the session token lives
    pub session: S,
}

impl<B, S> AppEnvironment<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub const fn new(api: B, session: S) -> Self {
        Self { api, session }
    }
}

/// Current session token, or [`ApiError::MissingToken`] when logged out
pub(crate) fn require_token<S: SessionStore>(session: &S) -> Result<String, RequestError> {
    session
        .token()?
        .ok_or(RequestError::Api(ApiError::MissingToken))
}
