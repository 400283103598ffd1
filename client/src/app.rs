//! Application root: both slices behind one state, one action type, one reducer.

use crate::auth::{AuthAction, AuthReducer, AuthState};
use crate::environment::AppEnvironment;
use crate::request::RequestId;
use crate::review::{ReviewAction, ReviewReducer, ReviewState};
use fscomics_api::BackendApi;
use fscomics_core::environment::SessionStore;
use fscomics_core::{effect::Effect, reducer::Reducer, SmallVec};
use fscomics_runtime::Store;

/// Whole client state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Auth slice
    pub auth: AuthState,
    /// Review slice
    pub review: ReviewState,
}

impl AppState {
    /// Either slice is loading
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.auth.is_loading_auth || self.review.is_loading_review
    }
}

/// Every action the client store accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Routed to the auth slice
    Auth(AuthAction),
    /// Routed to the review slice
    Review(ReviewAction),
}

impl AppAction {
    /// Whether this action completes request `id`, in either slice
    #[must_use]
    pub fn completes(&self, id: RequestId) -> bool {
        match self {
            Self::Auth(action) => action.completes(id),
            Self::Review(action) => action.completes(id),
        }
    }
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<ReviewAction> for AppAction {
    fn from(action: ReviewAction) -> Self {
        Self::Review(action)
    }
}

/// Root reducer forwarding to the slice reducers
#[derive(Debug)]
pub struct AppReducer<B, S> {
    auth: AuthReducer<B, S>,
    review: ReviewReducer<B, S>,
}

impl<B, S> AppReducer<B, S> {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            auth: AuthReducer::new(),
            review: ReviewReducer::new(),
        }
    }
}

impl<B, S> Default for AppReducer<B, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, S> Clone for AppReducer<B, S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<B, S> Reducer for AppReducer<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<B, S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Auth(action) => self
                .auth
                .reduce(&mut state.auth, action, env)
                .into_iter()
                .map(|effect| effect.map(AppAction::Auth))
                .collect(),
            AppAction::Review(action) => self
                .review
                .reduce(&mut state.review, action, env)
                .into_iter()
                .map(|effect| effect.map(AppAction::Review))
                .collect(),
        }
    }
}

/// The client store
pub type AppStore<B, S> = Store<AppState, AppAction, AppEnvironment<B, S>, AppReducer<B, S>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthModal, AuthRequest, AuthResponse};
    use crate::review::{ReviewOperation, ReviewRequest};
    use fscomics_api::ApiError;
    use fscomics_testing::mocks::{InMemorySessionStore, MockBackend};
    use fscomics_testing::{assertions, ReducerTest};

    type TestReducer = AppReducer<MockBackend, InMemorySessionStore>;

    fn test_env() -> AppEnvironment<MockBackend, InMemorySessionStore> {
        AppEnvironment::new(MockBackend::new(), InMemorySessionStore::new())
    }

    #[test]
    fn test_routes_to_auth_slice() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AppState::default())
            .when_action(AppAction::Auth(AuthAction::ModalClosed(AuthModal::Login)))
            .then_state(|state| {
                assert!(!state.auth.open_login);
                assert_eq!(state.review, ReviewState::default());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_routes_to_review_slice() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AppState::default())
            .when_action(AppAction::Review(ReviewAction::LoadingSet(true)))
            .then_state(|state| {
                assert!(state.review.is_loading_review);
                assert!(state.is_loading());
            })
            .run();
    }

    #[test]
    fn test_slice_effects_are_lifted() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AppState::default())
            .when_action(AppAction::Auth(AuthAction::Requested {
                id: RequestId(1),
                request: AuthRequest::FetchProfiles,
            }))
            .then_effects(assertions::assert_has_future_effect)
            .run();

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(AppState::default())
            .when_action(AppAction::Review(ReviewAction::Requested {
                id: RequestId(2),
                request: ReviewRequest::FetchReviews,
            }))
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn test_completion_predicates() {
        let failed = AppAction::Review(ReviewAction::RequestFailed {
            id: RequestId(5),
            operation: ReviewOperation::FetchComments,
            error: ApiError::RequestFailed("down".to_string()).into(),
        });
        let loaded = AppAction::Auth(AuthAction::RequestSucceeded {
            id: RequestId(6),
            response: AuthResponse::ProfilesLoaded(vec![]),
        });

        assert!(failed.completes(RequestId(5)));
        assert!(!failed.completes(RequestId(6)));
        assert!(loaded.completes(RequestId(6)));
        assert!(!AppAction::Review(ReviewAction::ModalOpened).completes(RequestId(5)));
    }
}
