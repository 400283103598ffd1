//! Named multi-step workflows over the client store.
//!
//! Each workflow sends actions to the store and waits for the completion
//! action of every request it issues, matched by request id. A sequence stops at the first
//! rejected step and nothing already done is undone. Loading flags raised
//! by a workflow are always lowered again, including after a failure or a
//! timeout.

use crate::app::{AppAction, AppReducer, AppState, AppStore};
use crate::auth::{AuthAction, AuthModal, AuthRequest, AuthResponse};
use crate::environment::AppEnvironment;
use crate::error::ClientError;
use crate::request::RequestIds;
use crate::review::{ReviewAction, ReviewOperation, ReviewRequest, ReviewResponse};
use crate::views::{CommentForm, CredentialsForm, FeedView, HeaderView, NewReviewForm, ProfileForm};
use fscomics_api::{BackendApi, NewProfile, ProfileUpdate, ReviewId, Upload};
use fscomics_core::environment::SessionStore;
use fscomics_runtime::Store;
use std::future::Future;
use std::time::Duration;

/// Nickname given to the profile created at signup
pub const DEFAULT_NICKNAME: &str = "モブキャラ";

/// Default time a workflow waits for one completion
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables of [`Client`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// How long to wait for each request to complete
    pub wait_timeout: Duration,
    /// Nickname of the profile created at signup
    pub default_nickname: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            default_nickname: DEFAULT_NICKNAME.to_string(),
        }
    }
}

/// Result of [`Client::boot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// No stored token; the login modal stays open
    SignedOut,
    /// The stored token was refused; the login modal was reopened
    SessionRejected {
        /// Why the own-profile fetch failed
        reason: String,
    },
    /// Session restored and the feed loaded
    Ready,
}

/// FSComics client
///
/// Owns the store and a handle to the session holder. Cheap accessors
/// derive the header and feed from the current state.
///
/// # Example
///
/// ```no_run
/// use fscomics::{Client, ClientSettings, CredentialsForm, FileSessionStore};
/// use fscomics_api::BackendClient;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let api = BackendClient::new("http://127.0.0.1:8000/");
/// let session = FileSessionStore::new("session.json");
/// let client = Client::new(api, session, ClientSettings::default());
///
/// client.login(&CredentialsForm::new("reader@example.com", "secret")).await?;
/// if let Some(feed) = client.feed().await {
///     println!("{feed}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    store: AppStore<B, S>,
    session: S,
    settings: ClientSettings,
    ids: RequestIds,
}

impl<B, S> Client<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    /// Create a client with the initial state (login modal open)
    #[must_use]
    pub fn new(api: B, session: S, settings: ClientSettings) -> Self {
        let environment = AppEnvironment::new(api, session.clone());
        Self {
            store: Store::new(AppState::default(), AppReducer::new(), environment),
            session,
            settings,
            ids: RequestIds::new(),
        }
    }

    /// Settings in use
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Snapshot of the whole state
    pub async fn state(&self) -> AppState {
        self.store.state(Clone::clone).await
    }

    /// Current header
    pub async fn header(&self) -> HeaderView {
        self.store.state(HeaderView::from_state).await
    }

    /// Current feed, `None` while logged out
    pub async fn feed(&self) -> Option<FeedView> {
        self.store.state(FeedView::from_state).await
    }

    /// Stop accepting actions and wait for running requests
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] when requests are still running after
    /// the wait timeout.
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        Ok(self.store.shutdown(self.settings.wait_timeout).await?)
    }

    // Session

    /// Restore a stored session
    ///
    /// Without a token nothing is requested. With one, the login modal is
    /// closed and the own profile fetched; if that fails the login modal is
    /// reopened and boot stops. Otherwise reviews, profiles, and comments
    /// are fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error if the session holder cannot be read or one of the
    /// feed fetches fails.
    #[tracing::instrument(skip(self), name = "boot")]
    pub async fn boot(&self) -> Result<BootOutcome, ClientError> {
        if self.session.token()?.is_none() {
            tracing::info!("No stored session");
            return Ok(BootOutcome::SignedOut);
        }

        self.dispatch(AuthAction::ModalClosed(AuthModal::Login)).await?;

        if let Err(error) = self.request_auth(AuthRequest::FetchMyProfile).await {
            tracing::warn!(%error, "Stored session rejected");
            self.dispatch(AuthAction::ModalOpened(AuthModal::Login)).await?;
            return Ok(BootOutcome::SessionRejected {
                reason: error.to_string(),
            });
        }

        self.refresh().await?;
        tracing::info!("Session restored");
        Ok(BootOutcome::Ready)
    }

    /// Log in and load the feed
    ///
    /// The login modal closes only when every step succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an invalid form (nothing is
    /// sent), otherwise the first failing step.
    #[tracing::instrument(skip_all, name = "login")]
    pub async fn login(&self, form: &CredentialsForm) -> Result<(), ClientError> {
        let credentials = form.credentials()?;

        self.with_auth_loading(async {
            self.request_auth(AuthRequest::Authenticate(credentials)).await?;
            self.load_signed_in().await
        })
        .await?;

        self.dispatch(AuthAction::ModalClosed(AuthModal::Login)).await
    }

    /// Create an account, log in, create its profile, and load the feed
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an invalid form, otherwise the
    /// first failing step. Earlier steps are not rolled back.
    #[tracing::instrument(skip_all, name = "signup")]
    pub async fn signup(&self, form: &CredentialsForm) -> Result<(), ClientError> {
        let credentials = form.credentials()?;

        self.with_auth_loading(async {
            self.request_auth(AuthRequest::Register(credentials.clone()))
                .await?;
            self.request_auth(AuthRequest::Authenticate(credentials)).await?;
            self.request_auth(AuthRequest::CreateProfile(NewProfile {
                nick_name: self.settings.default_nickname.clone(),
            }))
            .await?;
            self.load_signed_in().await
        })
        .await?;

        self.dispatch(AuthAction::ModalClosed(AuthModal::Signup)).await
    }

    /// Forget the session and return to the login modal
    ///
    /// # Errors
    ///
    /// Returns an error if the session holder cannot be cleared.
    #[tracing::instrument(skip(self), name = "logout")]
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.session.clear()?;

        self.dispatch(AuthAction::NickNameEdited(String::new())).await?;
        self.dispatch(AuthAction::ModalClosed(AuthModal::Profile)).await?;
        self.dispatch(ReviewAction::ModalClosed).await?;
        self.dispatch(AuthAction::ModalOpened(AuthModal::Login)).await
    }

    // Modals

    /// Show the login modal, hiding signup
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the store is shutting down.
    pub async fn open_login(&self) -> Result<(), ClientError> {
        self.dispatch(AuthAction::ModalOpened(AuthModal::Login)).await?;
        self.dispatch(AuthAction::ModalClosed(AuthModal::Signup)).await
    }

    /// Show the signup modal, hiding login
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the store is shutting down.
    pub async fn open_signup(&self) -> Result<(), ClientError> {
        self.dispatch(AuthAction::ModalOpened(AuthModal::Signup)).await?;
        self.dispatch(AuthAction::ModalClosed(AuthModal::Login)).await
    }

    /// Show the profile modal, hiding the compose modal
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the store is shutting down.
    pub async fn open_profile(&self) -> Result<(), ClientError> {
        self.dispatch(AuthAction::ModalOpened(AuthModal::Profile)).await?;
        self.dispatch(ReviewAction::ModalClosed).await
    }

    /// Show the compose modal, hiding the profile modal
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the store is shutting down.
    pub async fn open_new_review(&self) -> Result<(), ClientError> {
        self.dispatch(ReviewAction::ModalOpened).await?;
        self.dispatch(AuthAction::ModalClosed(AuthModal::Profile)).await
    }

    /// Hide one of the auth modals
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the store is shutting down.
    pub async fn close(&self, modal: AuthModal) -> Result<(), ClientError> {
        self.dispatch(AuthAction::ModalClosed(modal)).await
    }

    /// Hide the compose modal
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the store is shutting down.
    pub async fn close_new_review(&self) -> Result<(), ClientError> {
        self.dispatch(ReviewAction::ModalClosed).await
    }

    // Profile

    /// Live edit of the session user's nickname; nothing is sent
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Store`] if the store is shutting down.
    pub async fn edit_nickname(&self, nick_name: impl Into<String>) -> Result<(), ClientError> {
        self.dispatch(AuthAction::NickNameEdited(nick_name.into())).await
    }

    /// Save the edited nickname and an optional new avatar
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when the nickname is empty,
    /// otherwise the backend failure. The profile modal stays open on
    /// failure.
    #[tracing::instrument(skip_all, name = "update_profile")]
    pub async fn update_profile(&self, avatar: Option<Upload>) -> Result<(), ClientError> {
        let profile = self.store.state(|s| s.auth.my_profile.clone()).await;
        ProfileForm {
            nick_name: profile.nick_name.clone(),
        }
        .check()?;

        let update = ProfileUpdate {
            id: profile.id,
            nick_name: profile.nick_name,
            avatar,
        };
        self.with_auth_loading(self.request_auth(AuthRequest::UpdateProfile(update)))
            .await?;

        self.dispatch(AuthAction::ModalClosed(AuthModal::Profile)).await
    }

    // Reviews

    /// Publish a review and close the compose modal
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when a text field is empty,
    /// otherwise the backend failure.
    #[tracing::instrument(skip_all, name = "post_review")]
    pub async fn post_review(&self, form: &NewReviewForm) -> Result<(), ClientError> {
        let review = form.request()?;

        self.with_review_loading(self.request_review(ReviewRequest::CreateReview(review)))
            .await?;

        self.dispatch(ReviewAction::ModalClosed).await
    }

    /// Comment on `review`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] when the text is empty, otherwise
    /// the backend failure.
    #[tracing::instrument(skip(self, form), name = "post_comment")]
    pub async fn post_comment(&self, review: ReviewId, form: &CommentForm) -> Result<(), ClientError> {
        let comment = form.request(review)?;

        self.with_review_loading(self.request_review(ReviewRequest::CreateComment(comment)))
            .await?;
        Ok(())
    }

    /// Like `review`, or take the like back
    ///
    /// A toggle issued while another toggle of the same review is still
    /// running does not reach the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the review is not cached,
    /// [`ClientError::InProgress`] while a toggle of the same review is
    /// running, otherwise the backend failure.
    #[tracing::instrument(skip(self), name = "toggle_like")]
    pub async fn toggle_like(&self, review: ReviewId) -> Result<(), ClientError> {
        let (request, running) = self
            .store
            .state(|s| {
                let actor = s.auth.my_profile.user_profile;
                let running = s.review.likes_in_flight.contains(&review);
                s.review.review(review).map(|r| {
                    let request = ReviewRequest::ToggleLike {
                        review,
                        title: r.title.clone(),
                        current: r.liked_user.clone(),
                        actor,
                    };
                    (request, running)
                })
            })
            .await
            .ok_or_else(|| ClientError::NotFound(format!("review {review}")))?;

        if running {
            return Err(ClientError::InProgress(
                ReviewOperation::ToggleLike { review }.to_string(),
            ));
        }

        self.with_review_loading(self.request_review(request)).await?;
        Ok(())
    }

    // Plumbing

    async fn dispatch(&self, action: impl Into<AppAction>) -> Result<(), ClientError> {
        self.store.send(action.into()).await?;
        Ok(())
    }

    /// Profiles, reviews, and comments, fetched concurrently
    async fn refresh(&self) -> Result<(), ClientError> {
        let (reviews, profiles, comments) = futures::join!(
            self.request_review(ReviewRequest::FetchReviews),
            self.request_auth(AuthRequest::FetchProfiles),
            self.request_review(ReviewRequest::FetchComments),
        );
        reviews?;
        profiles?;
        comments?;
        Ok(())
    }

    async fn load_signed_in(&self) -> Result<(), ClientError> {
        self.refresh().await?;
        self.request_auth(AuthRequest::FetchMyProfile).await?;
        Ok(())
    }

    /// Send one auth request and wait for its own completion
    ///
    /// A timed-out request keeps running; its late completion still updates
    /// the state but never answers a later request.
    async fn request_auth(&self, request: AuthRequest) -> Result<AuthResponse, ClientError> {
        let id = self.ids.next();
        let completion = self
            .store
            .send_and_wait_for(
                AppAction::Auth(AuthAction::Requested { id, request }),
                move |action| action.completes(id),
                self.settings.wait_timeout,
            )
            .await?;

        match completion {
            AppAction::Auth(AuthAction::RequestSucceeded { response, .. }) => Ok(response),
            AppAction::Auth(AuthAction::RequestFailed { operation, error, .. }) => {
                Err(ClientError::Rejected {
                    operation: operation.to_string(),
                    error,
                })
            },
            other => Err(ClientError::UnexpectedAction(format!("{other:?}"))),
        }
    }

    async fn request_review(&self, request: ReviewRequest) -> Result<ReviewResponse, ClientError> {
        let id = self.ids.next();
        let completion = self
            .store
            .send_and_wait_for(
                AppAction::Review(ReviewAction::Requested { id, request }),
                move |action| action.completes(id),
                self.settings.wait_timeout,
            )
            .await?;

        match completion {
            AppAction::Review(ReviewAction::RequestSucceeded { response, .. }) => Ok(response),
            AppAction::Review(ReviewAction::RequestFailed { operation, error, .. }) => {
                Err(ClientError::Rejected {
                    operation: operation.to_string(),
                    error,
                })
            },
            AppAction::Review(ReviewAction::RequestDropped { operation, .. }) => {
                Err(ClientError::InProgress(operation.to_string()))
            },
            other => Err(ClientError::UnexpectedAction(format!("{other:?}"))),
        }
    }

    async fn with_auth_loading<T>(
        &self,
        work: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        self.dispatch(AuthAction::LoadingSet(true)).await?;
        let result = work.await;
        let ended = self.dispatch(AuthAction::LoadingSet(false)).await;
        let value = result?;
        ended?;
        Ok(value)
    }

    async fn with_review_loading<T>(
        &self,
        work: impl Future<Output = Result<T, ClientError>>,
    ) -> Result<T, ClientError> {
        self.dispatch(ReviewAction::LoadingSet(true)).await?;
        let result = work.await;
        let ended = self.dispatch(ReviewAction::LoadingSet(false)).await;
        let value = result?;
        ended?;
        Ok(value)
    }
}
