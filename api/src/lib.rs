//! # FSComics API
//!
//! Typed client for the book-review backend: authentication, profiles,
//! reviews, likes, and comments.
//!
//! ## Example
//!
//! ```no_run
//! use fscomics_api::{BackendApi, BackendClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BackendClient::new("http://localhost:8000/");
//!
//!     let tokens = client
//!         .authenticate(&Credentials::new("reader@example.com", "secret"))
//!         .await?;
//!
//!     let reviews = client.reviews(&tokens.access).await?;
//!     println!("{} reviews", reviews.len());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod likes;
pub mod types;

// Re-export main types for convenience
pub use backend::BackendApi;
pub use client::BackendClient;
pub use error::ApiError;
pub use likes::LikeChange;
pub use types::{
    Account, Comment, CommentId, Credentials, NewComment, NewProfile, NewReview, Profile,
    ProfileId, ProfileUpdate, Review, ReviewId, TokenPair, Upload, UserId,
};
