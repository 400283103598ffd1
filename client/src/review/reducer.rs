//! Reducer for the review slice.

use super::actions::{ReviewAction, ReviewOperation, ReviewRequest, ReviewResponse};
use super::state::ReviewState;
use crate::environment::{require_token, AppEnvironment};
use crate::error::RequestError;
use crate::request::RequestId;
use fscomics_api::{BackendApi, LikeChange};
use fscomics_core::environment::SessionStore;
use fscomics_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};
use std::marker::PhantomData;

/// Reducer for reviews, comments, and likes
#[derive(Debug)]
pub struct ReviewReducer<B, S> {
    _marker: PhantomData<fn() -> (B, S)>,
}

impl<B, S> ReviewReducer<B, S> {
    /// Creates a new `ReviewReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B, S> Default for ReviewReducer<B, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, S> Clone for ReviewReducer<B, S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<B, S> ReviewReducer<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    /// Run one request against the backend
    ///
    /// Every review endpoint needs the session token.
    async fn perform(api: &B, session: &S, request: ReviewRequest) -> Result<ReviewResponse, RequestError> {
        let token = require_token(session)?;

        let response = match request {
            ReviewRequest::FetchReviews => ReviewResponse::ReviewsLoaded(api.reviews(&token).await?),
            ReviewRequest::FetchComments => {
                ReviewResponse::CommentsLoaded(api.comments(&token).await?)
            },
            ReviewRequest::CreateReview(review) => {
                ReviewResponse::ReviewCreated(api.create_review(&token, &review).await?)
            },
            ReviewRequest::CreateComment(comment) => {
                ReviewResponse::CommentCreated(api.create_comment(&token, &comment).await?)
            },
            ReviewRequest::ToggleLike {
                review,
                title,
                current,
                actor,
            } => {
                let change = LikeChange::plan(review, &title, &current, actor);
                ReviewResponse::LikesUpdated(api.update_likes(&token, &change).await?)
            },
        };

        Ok(response)
    }

    fn request_effect(id: RequestId, request: ReviewRequest, env: &AppEnvironment<B, S>) -> Effect<ReviewAction> {
        let api = env.api.clone();
        let session = env.session.clone();
        let operation = request.operation();

        async_effect! {
            Some(match Self::perform(&api, &session, request).await {
                Ok(response) => ReviewAction::RequestSucceeded { id, response },
                Err(error) => ReviewAction::RequestFailed { id, operation, error },
            })
        }
    }

    fn apply_response(state: &mut ReviewState, response: ReviewResponse) {
        match response {
            ReviewResponse::ReviewsLoaded(reviews) => state.reviews = reviews,
            ReviewResponse::CommentsLoaded(comments) => state.comments = comments,
            ReviewResponse::ReviewCreated(review) => state.reviews.push(review),
            ReviewResponse::CommentCreated(comment) => state.comments.push(comment),
            ReviewResponse::LikesUpdated(review) => {
                state.likes_in_flight.remove(&review.id);
                state.replace_review(review);
            },
        }
        state.last_error = None;
    }
}

impl<B, S> Reducer for ReviewReducer<B, S>
where
    B: BackendApi + Clone + 'static,
    S: SessionStore + Clone + 'static,
{
    type State = ReviewState;
    type Action = ReviewAction;
    type Environment = AppEnvironment<B, S>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ReviewAction::ModalOpened => {
                state.open_new_review = true;
                SmallVec::new()
            },
            ReviewAction::ModalClosed => {
                state.open_new_review = false;
                SmallVec::new()
            },
            ReviewAction::LoadingSet(loading) => {
                state.is_loading_review = loading;
                SmallVec::new()
            },
            ReviewAction::Requested { id, request } => {
                let operation = request.operation();
                if let ReviewOperation::ToggleLike { review } = operation {
                    if !state.likes_in_flight.insert(review) {
                        tracing::info!(%id, %review, "Like toggle already in flight, dropping");
                        // The requester still gets a completion
                        return smallvec![async_effect! {
                            Some(ReviewAction::RequestDropped { id, operation })
                        }];
                    }
                }

                tracing::debug!(%id, %operation, "Review request started");
                smallvec![Self::request_effect(id, request, env)]
            },
            ReviewAction::RequestSucceeded { id, response } => {
                tracing::debug!(%id, operation = %response.operation(), "Review request succeeded");
                Self::apply_response(state, response);
                SmallVec::new()
            },
            ReviewAction::RequestFailed { id, operation, error } => {
                tracing::warn!(%id, %operation, %error, "Review request failed");
                if let ReviewOperation::ToggleLike { review } = operation {
                    state.likes_in_flight.remove(&review);
                }
                state.last_error = Some(format!("{operation} failed: {error}"));
                SmallVec::new()
            },
            ReviewAction::RequestDropped { .. } => SmallVec::new(),
        }
    }
}
