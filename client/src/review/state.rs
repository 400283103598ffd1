//! State of the review slice.

use fscomics_api::{Comment, Review, ReviewId};
use std::collections::HashSet;

/// Reviews, comments, and the compose modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewState {
    /// A review workflow is running
    pub is_loading_review: bool,
    /// Compose modal visible
    pub open_new_review: bool,
    /// Cached reviews, in backend order
    pub reviews: Vec<Review>,
    /// Cached comments, in backend order
    pub comments: Vec<Comment>,
    /// Reason of the last failed request, cleared by the next success
    pub last_error: Option<String>,
    /// Reviews with a like toggle awaiting its response
    pub likes_in_flight: HashSet<ReviewId>,
}

impl ReviewState {
    /// Review with the given id
    #[must_use]
    pub fn review(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    /// Comments on one review, in cached order
    pub fn comments_on(&self, review: ReviewId) -> impl Iterator<Item = &Comment> {
        self.comments.iter().filter(move |c| c.review == review)
    }

    pub(crate) fn replace_review(&mut self, updated: Review) {
        if let Some(existing) = self.reviews.iter_mut().find(|r| r.id == updated.id) {
            *existing = updated;
        }
    }
}
