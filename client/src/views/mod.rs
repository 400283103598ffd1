//! Read-only projections of [`AppState`](crate::app::AppState) and the form
//! models that feed the write workflows.

pub mod feed;
pub mod forms;
pub mod header;

pub use feed::{CommentLine, FeedView, Person, ReviewCard, MAX_LIKER_AVATARS};
pub use forms::{CommentForm, CredentialsForm, FieldError, FormErrors, NewReviewForm, ProfileForm};
pub use header::HeaderView;
