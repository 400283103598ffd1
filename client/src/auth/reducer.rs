//! Reducer for the auth slice.

use super::actions::{AuthAction, AuthRequest, AuthResponse};
use super::state::AuthState;
use crate::environment::{require_token, AppEnvironment};
use crate::error::RequestError;
use crate::request::RequestId;
use fscomics_api::BackendApi;
use fscomics_core::environment::SessionStore;
use fscomics_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::marker::PhantomData;

/// Reducer for modal flags, loading state, and profiles
#[derive(Debug)]
pub struct AuthReducer<B, S> {
    _marker: PhantomData<fn() -> (B, S)>,
}

impl<B, S> AuthReducer<B, S> {
    /// Creates a new `AuthReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B, S> Default for AuthReducer<B, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, S> Clone for AuthReducer<B, S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<B, S> AuthReducer<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    /// Run one request against the backend
    async fn perform(api: &B, session: &S, request: AuthRequest) -> Result<AuthResponse, RequestError> {
        match request {
            AuthRequest::Authenticate(credentials) => {
                let tokens = api.authenticate(&credentials).await?;
                session.set_token(&tokens.access)?;
                Ok(AuthResponse::Authenticated)
            },
            AuthRequest::Register(credentials) => {
                Ok(AuthResponse::Registered(api.register(&credentials).await?))
            },
            AuthRequest::CreateProfile(profile) => {
                let token = require_token(session)?;
                Ok(AuthResponse::ProfileCreated(
                    api.create_profile(&token, &profile).await?,
                ))
            },
            AuthRequest::UpdateProfile(update) => {
                let token = require_token(session)?;
                Ok(AuthResponse::ProfileUpdated(
                    api.update_profile(&token, &update).await?,
                ))
            },
            AuthRequest::FetchMyProfile => {
                let token = require_token(session)?;
                Ok(AuthResponse::MyProfileLoaded(api.my_profile(&token).await?))
            },
            AuthRequest::FetchProfiles => {
                let token = require_token(session)?;
                Ok(AuthResponse::ProfilesLoaded(api.profiles(&token).await?))
            },
        }
    }

    fn request_effect(id: RequestId, request: AuthRequest, env: &AppEnvironment<B, S>) -> Effect<AuthAction> {
        let api = env.api.clone();
        let session = env.session.clone();
        let operation = request.operation();

        async_effect! {
            Some(match Self::perform(&api, &session, request).await {
                Ok(response) => AuthAction::RequestSucceeded { id, response },
                Err(error) => AuthAction::RequestFailed { id, operation, error },
            })
        }
    }

    fn apply_response(state: &mut AuthState, response: AuthResponse) {
        match response {
            AuthResponse::Authenticated | AuthResponse::Registered(_) => {},
            AuthResponse::ProfileCreated(profile) | AuthResponse::MyProfileLoaded(profile) => {
                state.my_profile = profile;
            },
            AuthResponse::ProfileUpdated(profile) => {
                state.replace_profile(&profile);
                state.my_profile = profile;
            },
            AuthResponse::ProfilesLoaded(profiles) => {
                state.profiles = profiles;
            },
        }
        state.last_error = None;
    }
}

impl<B, S> Reducer for AuthReducer<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AppEnvironment<B, S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::ModalOpened(modal) => {
                state.set_open(modal, true);
                SmallVec::new()
            },
            AuthAction::ModalClosed(modal) => {
                state.set_open(modal, false);
                SmallVec::new()
            },
            AuthAction::LoadingSet(loading) => {
                state.is_loading_auth = loading;
                SmallVec::new()
            },
            AuthAction::NickNameEdited(nick_name) => {
                state.my_profile.nick_name = nick_name;
                SmallVec::new()
            },
            AuthAction::Requested { id, request } => {
                tracing::debug!(%id, operation = %request.operation(), "Auth request started");
                smallvec![Self::request_effect(id, request, env)]
            },
            AuthAction::RequestSucceeded { id, response } => {
                tracing::debug!(%id, operation = %response.operation(), "Auth request succeeded");
                Self::apply_response(state, response);
                SmallVec::new()
            },
            AuthAction::RequestFailed { id, operation, error } => {
                tracing::warn!(%id, %operation, %error, "Auth request failed");
                state.last_error = Some(format!("{operation} failed: {error}"));
                SmallVec::new()
            },
        }
    }
}
