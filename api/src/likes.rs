//! Like toggling
//!
//! The backend has no "toggle" endpoint. The client computes the new liked
//! set itself and picks the request shape from it:
//!
//! | current set      | actor present | request                               |
//! |------------------|---------------|---------------------------------------|
//! | `[actor]`        | yes, alone    | `PUT api/review/{id}/` with `title`   |
//! | `[.., actor, ..]`| yes           | `PATCH api/review/{id}` without actor |
//! | anything else    | no            | `PATCH api/review/{id}` plus actor    |

use crate::types::{ReviewId, UserId};

/// The request needed to toggle one user's like on a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeChange {
    /// Actor was the only liker: full replace carrying just the title
    ReplaceAll {
        /// Review being updated
        review: ReviewId,
        /// Current title, required by the full-replace endpoint
        title: String,
    },
    /// Partial update with the complete new liked set
    Patch {
        /// Review being updated
        review: ReviewId,
        /// New liked set, order of the remaining likers preserved
        liked: Vec<UserId>,
    },
}

impl LikeChange {
    /// Plan the toggle of `actor`'s like on a review
    #[must_use]
    pub fn plan(review: ReviewId, title: &str, current: &[UserId], actor: UserId) -> Self {
        if !current.contains(&actor) {
            let mut liked = current.to_vec();
            liked.push(actor);
            return Self::Patch { review, liked };
        }

        if current.len() == 1 {
            return Self::ReplaceAll {
                review,
                title: title.to_string(),
            };
        }

        Self::Patch {
            review,
            liked: current.iter().copied().filter(|u| *u != actor).collect(),
        }
    }

    /// Review this change targets
    #[must_use]
    pub const fn review(&self) -> ReviewId {
        match self {
            Self::ReplaceAll { review, .. } | Self::Patch { review, .. } => *review,
        }
    }

    /// Liked set the backend will hold after the change
    #[must_use]
    pub fn resulting_likes(&self) -> Vec<UserId> {
        match self {
            Self::ReplaceAll { .. } => Vec::new(),
            Self::Patch { liked, .. } => liked.clone(),
        }
    }
}
