//! Workflow tests against the in-memory backend
//!
//! Every test drives a real store; only the backend and the session holder
//! are replaced.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use fscomics::auth::AuthModal;
use fscomics::views::{CommentForm, HeaderView};
use fscomics::{BootOutcome, Client, ClientError, ClientSettings, CredentialsForm, NewReviewForm};
use fscomics_api::{ApiError, LikeChange, Profile, ProfileId, Review, ReviewId, UserId};
use fscomics_core::environment::SessionStore;
use fscomics_runtime::StoreError;
use fscomics_testing::mocks::{Endpoint, InMemorySessionStore, MockBackend};
use std::time::Duration;

// ============================================================================
// Fixtures
// ============================================================================

const EMAIL: &str = "reader@example.com";
const PASSWORD: &str = "secret";

type TestClient = Client<MockBackend, InMemorySessionStore>;

fn settings() -> ClientSettings {
    ClientSettings {
        wait_timeout: Duration::from_secs(2),
        ..ClientSettings::default()
    }
}

fn client(backend: &MockBackend, session: &InMemorySessionStore) -> TestClient {
    Client::new(backend.clone(), session.clone(), settings())
}

fn profile(id: u64, user: UserId, nick: &str) -> Profile {
    Profile {
        id: ProfileId(id),
        nick_name: nick.to_string(),
        user_profile: user,
        created_at: "2021-04-01".to_string(),
        avatar: None,
    }
}

fn review(id: u64, author: UserId, liked: &[UserId]) -> Review {
    Review {
        id: ReviewId(id),
        title: format!("Review {id}"),
        book_name: "Dune".to_string(),
        content: "Spice must flow".to_string(),
        user_review: author,
        created_at: "2021-04-01".to_string(),
        img: None,
        liked_user: liked.to_vec(),
    }
}

/// Backend with one account, its profile, and one review by someone else
fn seeded_backend() -> (MockBackend, UserId) {
    let backend = MockBackend::new();
    let user = backend.with_account(EMAIL, PASSWORD);
    backend.with_profile(profile(100, user, "reader"));
    backend.with_profile(profile(101, UserId(77), "author"));
    backend.with_review(review(500, UserId(77), &[]));
    (backend, user)
}

async fn logged_in(backend: &MockBackend) -> (TestClient, InMemorySessionStore) {
    let session = InMemorySessionStore::new();
    let client = client(backend, &session);
    client
        .login(&CredentialsForm::new(EMAIL, PASSWORD))
        .await
        .expect("login should succeed");
    (client, session)
}

// ============================================================================
// Boot
// ============================================================================

#[tokio::test]
async fn test_boot_without_token_makes_no_calls() {
    let backend = MockBackend::new();
    let client = client(&backend, &InMemorySessionStore::new());

    let outcome = client.boot().await.unwrap();

    assert_eq!(outcome, BootOutcome::SignedOut);
    assert!(backend.calls().is_empty());
    let state = client.state().await;
    assert!(state.auth.open_login);
    assert_eq!(client.feed().await, None);
}

#[tokio::test]
async fn test_boot_with_rejected_token_reopens_login() {
    let backend = MockBackend::new();
    let client = client(&backend, &InMemorySessionStore::with_token("stale"));

    let outcome = client.boot().await.unwrap();

    assert!(matches!(outcome, BootOutcome::SessionRejected { .. }));
    assert_eq!(backend.calls(), vec![Endpoint::MyProfile]);
    let state = client.state().await;
    assert!(state.auth.open_login);
    assert!(state.review.reviews.is_empty());
    assert!(state.auth.profiles.is_empty());
}

#[tokio::test]
async fn test_boot_with_valid_token_loads_feed() {
    let (backend, user) = seeded_backend();
    backend.with_token("kept", user);
    let client = client(&backend, &InMemorySessionStore::with_token("kept"));

    let outcome = client.boot().await.unwrap();

    assert_eq!(outcome, BootOutcome::Ready);
    assert_eq!(backend.call_count(Endpoint::MyProfile), 1);
    assert_eq!(backend.call_count(Endpoint::Reviews), 1);
    assert_eq!(backend.call_count(Endpoint::Profiles), 1);
    assert_eq!(backend.call_count(Endpoint::Comments), 1);

    let state = client.state().await;
    assert!(!state.auth.open_login);
    assert_eq!(state.auth.my_profile.nick_name, "reader");

    let feed = client.feed().await.unwrap();
    assert_eq!(feed.cards.len(), 1);
    assert_eq!(feed.cards[0].author.nick_name, "author");
}

// ============================================================================
// Login / signup / logout
// ============================================================================

#[tokio::test]
async fn test_login_loads_everything_and_closes_modal() {
    let (backend, user) = seeded_backend();
    let (client, session) = logged_in(&backend).await;

    assert_eq!(session.token().unwrap(), Some(format!("token-{user}")));

    let state = client.state().await;
    assert!(!state.auth.open_login);
    assert!(!state.is_loading());
    assert_eq!(state.auth.my_profile.user_profile, user);
    assert_eq!(state.auth.profiles.len(), 2);
    assert_eq!(state.review.reviews.len(), 1);
    assert_eq!(state.auth.last_error, None);
    assert!(matches!(client.header().await, HeaderView::SignedIn { .. }));
}

#[tokio::test]
async fn test_login_with_wrong_password_keeps_modal_open() {
    let (backend, _) = seeded_backend();
    let session = InMemorySessionStore::new();
    let client = client(&backend, &session);

    let error = client
        .login(&CredentialsForm::new(EMAIL, "wrong"))
        .await
        .unwrap_err();

    assert!(error.is_unauthorized());
    assert_eq!(backend.calls(), vec![Endpoint::Authenticate]);
    assert!(!session.is_authenticated());

    let state = client.state().await;
    assert!(state.auth.open_login);
    assert!(!state.auth.is_loading_auth);
    assert!(state.auth.last_error.as_deref().unwrap().starts_with("authenticate failed"));
}

#[tokio::test]
async fn test_invalid_credentials_form_sends_nothing() {
    let backend = MockBackend::new();
    let client = client(&backend, &InMemorySessionStore::new());

    let error = client
        .login(&CredentialsForm::new("not-an-email", "pw"))
        .await
        .unwrap_err();

    match error {
        ClientError::Validation(errors) => {
            assert!(errors.has("email"));
            assert!(errors.has("password"));
        },
        other => panic!("expected a validation error, got {other:?}"),
    }
    assert!(backend.calls().is_empty());
    assert!(!client.state().await.is_loading());
}

#[tokio::test]
async fn test_signup_creates_default_profile() {
    let backend = MockBackend::new();
    let session = InMemorySessionStore::new();
    let client = client(&backend, &session);
    client.open_signup().await.unwrap();

    client
        .signup(&CredentialsForm::new("new@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(
        &backend.calls()[..3],
        &[Endpoint::Register, Endpoint::Authenticate, Endpoint::CreateProfile]
    );
    assert!(session.is_authenticated());

    let state = client.state().await;
    assert!(!state.auth.open_signup);
    assert!(!state.auth.is_loading_auth);
    assert_eq!(state.auth.my_profile.nick_name, "モブキャラ");
    assert_eq!(state.auth.profiles.len(), 1);
}

#[tokio::test]
async fn test_signup_stops_at_first_rejection() {
    let (backend, _) = seeded_backend();
    let client = client(&backend, &InMemorySessionStore::new());
    client.open_signup().await.unwrap();

    let error = client
        .signup(&CredentialsForm::new(EMAIL, PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Rejected { ref operation, .. } if operation == "register"));
    assert_eq!(backend.calls(), vec![Endpoint::Register]);

    let state = client.state().await;
    assert!(state.auth.open_signup);
    assert!(!state.auth.is_loading_auth);
}

#[tokio::test]
async fn test_logout_resets_session() {
    let (backend, _) = seeded_backend();
    let (client, session) = logged_in(&backend).await;
    client.open_profile().await.unwrap();

    client.logout().await.unwrap();

    assert!(!session.is_authenticated());
    let state = client.state().await;
    assert!(state.auth.open_login);
    assert!(!state.auth.open_profile);
    assert!(!state.review.open_new_review);
    assert_eq!(state.auth.my_profile.nick_name, "");
    assert_eq!(client.feed().await, None);
    assert!(matches!(client.header().await, HeaderView::SignedOut { .. }));
}

// ============================================================================
// Modals
// ============================================================================

#[tokio::test]
async fn test_modal_pairs() {
    let client = client(&MockBackend::new(), &InMemorySessionStore::new());

    client.open_signup().await.unwrap();
    let state = client.state().await;
    assert!(state.auth.open_signup && !state.auth.open_login);

    client.open_login().await.unwrap();
    let state = client.state().await;
    assert!(state.auth.open_login && !state.auth.open_signup);

    client.open_profile().await.unwrap();
    client.open_new_review().await.unwrap();
    let state = client.state().await;
    assert!(state.review.open_new_review && !state.auth.open_profile);

    client.open_profile().await.unwrap();
    let state = client.state().await;
    assert!(state.auth.open_profile && !state.review.open_new_review);

    client.close(AuthModal::Profile).await.unwrap();
    client.close_new_review().await.unwrap();
    let state = client.state().await;
    assert!(!state.auth.open_profile && !state.review.open_new_review);
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_update_profile_renames() {
    let (backend, _) = seeded_backend();
    let (client, _) = logged_in(&backend).await;
    client.open_profile().await.unwrap();

    client.edit_nickname("bookworm").await.unwrap();
    client.update_profile(None).await.unwrap();

    assert!(backend
        .stored_profiles()
        .iter()
        .any(|p| p.id == ProfileId(100) && p.nick_name == "bookworm"));

    let state = client.state().await;
    assert!(!state.auth.open_profile);
    assert!(!state.auth.is_loading_auth);
    assert_eq!(state.auth.profile(ProfileId(100)).unwrap().nick_name, "bookworm");
}

#[tokio::test]
async fn test_update_profile_requires_nickname() {
    let (backend, _) = seeded_backend();
    let (client, _) = logged_in(&backend).await;
    client.edit_nickname("").await.unwrap();

    let error = client.update_profile(None).await.unwrap_err();

    assert!(matches!(error, ClientError::Validation(_)));
    assert_eq!(backend.call_count(Endpoint::UpdateProfile), 0);
}

// ============================================================================
// Reviews and comments
// ============================================================================

#[tokio::test]
async fn test_post_review_appends_and_closes_modal() {
    let (backend, user) = seeded_backend();
    let (client, _) = logged_in(&backend).await;
    client.open_new_review().await.unwrap();

    let form = NewReviewForm {
        title: "Great".to_string(),
        book_name: "Foundation".to_string(),
        content: "Psychohistory".to_string(),
        img: None,
    };
    client.post_review(&form).await.unwrap();

    let state = client.state().await;
    assert_eq!(state.review.reviews.len(), 2);
    let created = state.review.reviews.last().unwrap();
    assert_eq!(created.title, "Great");
    assert_eq!(created.user_review, user);
    assert!(!state.review.open_new_review);
    assert!(!state.review.is_loading_review);

    let feed = client.feed().await.unwrap();
    assert_eq!(feed.cards[0].title, "Great");
}

#[tokio::test]
async fn test_empty_review_form_sends_nothing() {
    let (backend, _) = seeded_backend();
    let (client, _) = logged_in(&backend).await;
    client.open_new_review().await.unwrap();

    let error = client.post_review(&NewReviewForm::default()).await.unwrap_err();

    assert!(matches!(error, ClientError::Validation(_)));
    assert_eq!(backend.call_count(Endpoint::CreateReview), 0);
    assert!(client.state().await.review.open_new_review);
}

#[tokio::test]
async fn test_failed_review_clears_loading_and_keeps_modal() {
    let (backend, _) = seeded_backend();
    let (client, _) = logged_in(&backend).await;
    client.open_new_review().await.unwrap();
    backend.fail_on(
        Endpoint::CreateReview,
        ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        },
    );

    let form = NewReviewForm {
        title: "Great".to_string(),
        book_name: "Foundation".to_string(),
        content: "Psychohistory".to_string(),
        img: None,
    };
    let error = client.post_review(&form).await.unwrap_err();

    assert!(matches!(error, ClientError::Rejected { .. }));
    let state = client.state().await;
    assert!(!state.review.is_loading_review);
    assert!(state.review.open_new_review);
    assert_eq!(state.review.reviews.len(), 1);
    assert!(state.review.last_error.is_some());
}

#[tokio::test]
async fn test_post_comment_shows_under_review() {
    let (backend, _) = seeded_backend();
    let (client, _) = logged_in(&backend).await;

    client
        .post_comment(
            ReviewId(500),
            &CommentForm {
                text: "Agreed".to_string(),
            },
        )
        .await
        .unwrap();

    let feed = client.feed().await.unwrap();
    let comments = &feed.cards[0].comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "Agreed");
    assert_eq!(comments[0].author.nick_name, "reader");
}

// ============================================================================
// Likes
// ============================================================================

#[tokio::test]
async fn test_like_then_unlike() {
    let (backend, user) = seeded_backend();
    let (client, _) = logged_in(&backend).await;

    client.toggle_like(ReviewId(500)).await.unwrap();
    assert!(client.feed().await.unwrap().cards[0].liked_by_me);

    client.toggle_like(ReviewId(500)).await.unwrap();
    assert!(!client.feed().await.unwrap().cards[0].liked_by_me);

    assert_eq!(
        backend.like_changes(),
        vec![
            LikeChange::Patch {
                review: ReviewId(500),
                liked: vec![user],
            },
            LikeChange::ReplaceAll {
                review: ReviewId(500),
                title: "Review 500".to_string(),
            },
        ]
    );
    let state = client.state().await;
    assert!(state.review.likes_in_flight.is_empty());
    assert!(!state.review.is_loading_review);
}

#[tokio::test]
async fn test_concurrent_toggles_send_one_request() {
    let (backend, _) = seeded_backend();
    // Latency is per handle; the clone shares the seeded data
    let client = client(
        &backend.clone().with_latency(Duration::from_millis(50)),
        &InMemorySessionStore::new(),
    );
    client
        .login(&CredentialsForm::new(EMAIL, PASSWORD))
        .await
        .unwrap();
    let before = backend.call_count(Endpoint::UpdateLikes);

    let (first, second) = tokio::join!(
        client.toggle_like(ReviewId(500)),
        client.toggle_like(ReviewId(500)),
    );

    // Exactly one of the two reaches the backend; the other is refused
    let (done, refused) = if first.is_ok() { (first, second) } else { (second, first) };
    assert!(done.is_ok());
    assert!(matches!(
        refused,
        Err(ClientError::InProgress(ref operation)) if operation == "toggle like on review 500"
    ));
    assert_eq!(backend.call_count(Endpoint::UpdateLikes) - before, 1);
    assert!(client.state().await.review.likes_in_flight.is_empty());
}

#[tokio::test]
async fn test_like_on_unknown_review() {
    let (backend, _) = seeded_backend();
    let (client, _) = logged_in(&backend).await;

    let error = client.toggle_like(ReviewId(999)).await.unwrap_err();

    assert!(matches!(error, ClientError::NotFound(_)));
    assert_eq!(backend.call_count(Endpoint::UpdateLikes), 0);
    assert!(!client.state().await.review.is_loading_review);
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test]
async fn test_timeout_still_clears_loading() {
    let backend = MockBackend::new().with_latency(Duration::from_millis(500));
    let _ = backend.with_account(EMAIL, PASSWORD);
    let client = Client::new(
        backend,
        InMemorySessionStore::new(),
        ClientSettings {
            wait_timeout: Duration::from_millis(20),
            ..ClientSettings::default()
        },
    );

    let error = client
        .login(&CredentialsForm::new(EMAIL, PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Store(StoreError::Timeout)));
    let state = client.state().await;
    assert!(!state.auth.is_loading_auth);
    assert!(state.auth.open_login);
}

#[tokio::test]
async fn test_late_completion_does_not_answer_next_request() {
    let (backend, _) = seeded_backend();
    let (_, session) = logged_in(&backend).await;
    // Every call outlives the wait; the clone shares the seeded data
    let slow = Client::new(
        backend.clone().with_latency(Duration::from_millis(300)),
        session,
        ClientSettings {
            wait_timeout: Duration::from_millis(200),
            ..ClientSettings::default()
        },
    );
    let form = |text: &str| CommentForm {
        text: text.to_string(),
    };

    let first = slow.post_comment(ReviewId(500), &form("first")).await;
    // The first comment completes while the second one is being waited on
    let second = slow.post_comment(ReviewId(500), &form("second")).await;

    assert!(matches!(first, Err(ClientError::Store(StoreError::Timeout))));
    assert!(matches!(second, Err(ClientError::Store(StoreError::Timeout))));

    // Late completions still land in the state
    tokio::time::sleep(Duration::from_millis(400)).await;
    let state = slow.state().await;
    let texts: Vec<&str> = state.review.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(backend.call_count(Endpoint::CreateComment), 2);
    assert!(!state.review.is_loading_review);
}
