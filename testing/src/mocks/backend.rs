//! In-memory backend for testing.

use fscomics_api::{
    Account, ApiError, BackendApi, Comment, CommentId, Credentials, LikeChange, NewComment,
    NewProfile, NewReview, Profile, ProfileId, ProfileUpdate, Review, ReviewId, TokenPair, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Backend operations, as recorded by [`MockBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST authen/jwt/create`
    Authenticate,
    /// `POST api/register/`
    Register,
    /// `POST api/profile/`
    CreateProfile,
    /// `PUT api/profile/{id}/`
    UpdateProfile,
    /// `GET api/myprofile/`
    MyProfile,
    /// `GET api/profile/`
    Profiles,
    /// `GET api/review/`
    Reviews,
    /// `POST api/review/`
    CreateReview,
    /// `PUT`/`PATCH api/review/{id}`
    UpdateLikes,
    /// `GET api/comment/`
    Comments,
    /// `POST api/comment/`
    CreateComment,
}

#[derive(Debug, Default)]
struct BackendState {
    calls: Vec<Endpoint>,
    like_changes: Vec<LikeChange>,
    accounts: HashMap<String, (String, UserId)>,
    tokens: HashMap<String, UserId>,
    profiles: Vec<Profile>,
    reviews: Vec<Review>,
    comments: Vec<Comment>,
    failures: HashMap<Endpoint, ApiError>,
    next_id: u64,
}

impl BackendState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Record the call and apply a forced failure, if any
    fn enter(&mut self, endpoint: Endpoint) -> Result<(), ApiError> {
        self.calls.push(endpoint);
        match self.failures.get(&endpoint) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn user_for(&self, token: &str) -> Result<UserId, ApiError> {
        self.tokens.get(token).copied().ok_or(ApiError::Unauthorized)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Api {
        status: 404,
        message: format!("{what} not found"),
    }
}

/// In-memory backend.
///
/// Behaves like the real service for the happy paths the client relies on:
/// accounts issue tokens, tokens identify users, created records get fresh
/// ids. Every call is recorded. Individual endpoints can be forced to fail
/// with [`MockBackend::fail_on`].
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
    latency: Option<Duration>,
}

impl MockBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, BackendState>, ApiError> {
        self.state
            .lock()
            .map_err(|_| ApiError::RequestFailed("mock backend lock poisoned".to_string()))
    }

    #[allow(clippy::expect_used)] // Test setup helper
    fn setup(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("mock backend lock poisoned")
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Register an account and return its user id.
    #[must_use]
    pub fn with_account(&self, email: &str, password: &str) -> UserId {
        let mut state = self.setup();
        let user = UserId(state.next_id());
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), user));
        user
    }

    /// Accept `token` as a session of `user`.
    pub fn with_token(&self, token: &str, user: UserId) {
        self.setup().tokens.insert(token.to_string(), user);
    }

    /// Seed a profile.
    pub fn with_profile(&self, profile: Profile) {
        self.setup().profiles.push(profile);
    }

    /// Seed a review.
    pub fn with_review(&self, review: Review) {
        self.setup().reviews.push(review);
    }

    /// Seed a comment.
    pub fn with_comment(&self, comment: Comment) {
        self.setup().comments.push(comment);
    }

    /// Make every call to `endpoint` fail with `error`.
    pub fn fail_on(&self, endpoint: Endpoint, error: ApiError) {
        self.setup().failures.insert(endpoint, error);
    }

    /// All calls so far, in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<Endpoint> {
        self.setup().calls.clone()
    }

    /// Number of calls to `endpoint`.
    #[must_use]
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.setup().calls.iter().filter(|c| **c == endpoint).count()
    }

    /// Like changes received, in arrival order.
    #[must_use]
    pub fn like_changes(&self) -> Vec<LikeChange> {
        self.setup().like_changes.clone()
    }

    /// Current server-side profiles.
    #[must_use]
    pub fn stored_profiles(&self) -> Vec<Profile> {
        self.setup().profiles.clone()
    }
}

impl BackendApi for MockBackend {
    async fn authenticate(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::Authenticate)?;

        let user = match state.accounts.get(&credentials.email) {
            Some((password, user)) if *password == credentials.password => *user,
            _ => return Err(ApiError::Unauthorized),
        };

        let access = format!("token-{user}");
        state.tokens.insert(access.clone(), user);
        Ok(TokenPair {
            access,
            refresh: None,
        })
    }

    async fn register(&self, credentials: &Credentials) -> Result<Account, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::Register)?;

        if state.accounts.contains_key(&credentials.email) {
            return Err(ApiError::Api {
                status: 400,
                message: "user with this email already exists".to_string(),
            });
        }

        let user = UserId(state.next_id());
        state.accounts.insert(
            credentials.email.clone(),
            (credentials.password.clone(), user),
        );
        Ok(Account {
            id: Some(user),
            email: credentials.email.clone(),
        })
    }

    async fn create_profile(&self, token: &str, profile: &NewProfile) -> Result<Profile, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::CreateProfile)?;
        let user = state.user_for(token)?;

        let created = Profile {
            id: ProfileId(state.next_id()),
            nick_name: profile.nick_name.clone(),
            user_profile: user,
            created_at: "2021-04-01".to_string(),
            avatar: None,
        };
        state.profiles.push(created.clone());
        Ok(created)
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::UpdateProfile)?;
        state.user_for(token)?;

        let profile = state
            .profiles
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| not_found("profile"))?;
        profile.nick_name.clone_from(&update.nick_name);
        if let Some(avatar) = &update.avatar {
            profile.avatar = Some(format!("http://media.test/avatars/{}", avatar.file_name));
        }
        Ok(profile.clone())
    }

    async fn my_profile(&self, token: &str) -> Result<Profile, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::MyProfile)?;
        let user = state.user_for(token)?;

        state
            .profiles
            .iter()
            .find(|p| p.user_profile == user)
            .cloned()
            .ok_or_else(|| ApiError::EmptyCollection("api/myprofile/".to_string()))
    }

    async fn profiles(&self, token: &str) -> Result<Vec<Profile>, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::Profiles)?;
        state.user_for(token)?;
        Ok(state.profiles.clone())
    }

    async fn reviews(&self, token: &str) -> Result<Vec<Review>, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::Reviews)?;
        state.user_for(token)?;
        Ok(state.reviews.clone())
    }

    async fn create_review(&self, token: &str, review: &NewReview) -> Result<Review, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::CreateReview)?;
        let user = state.user_for(token)?;

        let created = Review {
            id: ReviewId(state.next_id()),
            title: review.title.clone(),
            book_name: review.book_name.clone(),
            content: review.content.clone(),
            user_review: user,
            created_at: "2021-04-01".to_string(),
            img: review
                .img
                .as_ref()
                .map(|img| format!("http://media.test/reviews/{}", img.file_name)),
            liked_user: Vec::new(),
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn update_likes(&self, token: &str, change: &LikeChange) -> Result<Review, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::UpdateLikes)?;
        state.user_for(token)?;
        state.like_changes.push(change.clone());

        let review = state
            .reviews
            .iter_mut()
            .find(|r| r.id == change.review())
            .ok_or_else(|| not_found("review"))?;
        review.liked_user = change.resulting_likes();
        Ok(review.clone())
    }

    async fn comments(&self, token: &str) -> Result<Vec<Comment>, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::Comments)?;
        state.user_for(token)?;
        Ok(state.comments.clone())
    }

    async fn create_comment(&self, token: &str, comment: &NewComment) -> Result<Comment, ApiError> {
        self.delay().await;
        let mut state = self.lock()?;
        state.enter(Endpoint::CreateComment)?;
        let user = state.user_for(token)?;

        let created = Comment {
            id: CommentId(state.next_id()),
            text: comment.text.clone(),
            user_comment: user,
            review: comment.review,
        };
        state.comments.push(created.clone());
        Ok(created)
    }
}
