//! Review slice: reviews, comments, likes, and the compose modal.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::{ReviewAction, ReviewOperation, ReviewRequest, ReviewResponse};
pub use reducer::ReviewReducer;
pub use state::ReviewState;
