//! Actions of the review slice.

use crate::error::RequestError;
use crate::request::RequestId;
use fscomics_api::{Comment, NewComment, NewReview, Review, ReviewId, UserId};
use std::fmt;

/// Asynchronous operations of the review slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewOperation {
    /// Load every review
    FetchReviews,
    /// Load every comment
    FetchComments,
    /// Publish a review
    CreateReview,
    /// Post a comment
    CreateComment,
    /// Toggle the session user's like on one review
    ToggleLike {
        /// Review being liked or unliked
        review: ReviewId,
    },
}

impl fmt::Display for ReviewOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchReviews => f.write_str("fetch reviews"),
            Self::FetchComments => f.write_str("fetch comments"),
            Self::CreateReview => f.write_str("create review"),
            Self::CreateComment => f.write_str("create comment"),
            Self::ToggleLike { review } => write!(f, "toggle like on review {review}"),
        }
    }
}

/// Request payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewRequest {
    /// All reviews
    FetchReviews,
    /// All comments
    FetchComments,
    /// Multipart review creation
    CreateReview(NewReview),
    /// Comment creation
    CreateComment(NewComment),
    /// Flip `actor`'s membership in the review's liked set
    ToggleLike {
        /// Review being liked or unliked
        review: ReviewId,
        /// Current title, needed when the last like is removed
        title: String,
        /// Liked set as currently cached
        current: Vec<UserId>,
        /// User doing the toggling
        actor: UserId,
    },
}

impl ReviewRequest {
    /// Operation this request starts
    #[must_use]
    pub const fn operation(&self) -> ReviewOperation {
        match self {
            Self::FetchReviews => ReviewOperation::FetchReviews,
            Self::FetchComments => ReviewOperation::FetchComments,
            Self::CreateReview(_) => ReviewOperation::CreateReview,
            Self::CreateComment(_) => ReviewOperation::CreateComment,
            Self::ToggleLike { review, .. } => ReviewOperation::ToggleLike { review: *review },
        }
    }
}

/// Success payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewResponse {
    /// Every review
    ReviewsLoaded(Vec<Review>),
    /// Every comment
    CommentsLoaded(Vec<Comment>),
    /// The created review
    ReviewCreated(Review),
    /// The created comment
    CommentCreated(Comment),
    /// Review after the like change
    LikesUpdated(Review),
}

impl ReviewResponse {
    /// Operation this response completes
    #[must_use]
    pub const fn operation(&self) -> ReviewOperation {
        match self {
            Self::ReviewsLoaded(_) => ReviewOperation::FetchReviews,
            Self::CommentsLoaded(_) => ReviewOperation::FetchComments,
            Self::ReviewCreated(_) => ReviewOperation::CreateReview,
            Self::CommentCreated(_) => ReviewOperation::CreateComment,
            Self::LikesUpdated(review) => ReviewOperation::ToggleLike { review: review.id },
        }
    }
}

/// Every input the review slice reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    // Synchronous transitions
    /// Show the compose modal
    ModalOpened,
    /// Hide the compose modal
    ModalClosed,
    /// Start or end the review loading indicator
    LoadingSet(bool),

    // Asynchronous requests and their completions
    /// Start a backend request
    Requested {
        /// Correlates the completion with this request
        id: RequestId,
        /// What to send
        request: ReviewRequest,
    },
    /// Request completed successfully
    RequestSucceeded {
        /// Id of the originating request
        id: RequestId,
        /// What came back
        response: ReviewResponse,
    },
    /// Request failed
    RequestFailed {
        /// Id of the originating request
        id: RequestId,
        /// Operation that failed
        operation: ReviewOperation,
        /// Why it failed
        error: RequestError,
    },
    /// Request was not sent because the same like toggle is still running
    RequestDropped {
        /// Id of the originating request
        id: RequestId,
        /// Operation that was dropped
        operation: ReviewOperation,
    },
}

impl ReviewAction {
    /// Whether this action completes request `id`, successfully or not
    #[must_use]
    pub fn completes(&self, id: RequestId) -> bool {
        match self {
            Self::RequestSucceeded { id: done, .. }
            | Self::RequestFailed { id: done, .. }
            | Self::RequestDropped { id: done, .. } => *done == id,
            _ => false,
        }
    }
}
