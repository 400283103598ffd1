//! Backend API trait

use crate::error::ApiError;
use crate::likes::LikeChange;
use crate::types::{
    Account, Comment, Credentials, NewComment, NewProfile, NewReview, Profile, ProfileUpdate,
    Review, TokenPair,
};
use std::future::Future;

/// The book-review backend.
///
/// Every authenticated call takes the session token explicitly; the caller
/// decides where the token comes from. Implementations never retry.
///
/// # Implementations
///
/// - [`BackendClient`](crate::BackendClient): HTTP via `reqwest`
/// - `MockBackend` in `fscomics-testing`: in-memory, records calls
pub trait BackendApi: Send + Sync {
    /// Exchange credentials for a token pair.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] for bad credentials, transport and parse
    /// errors otherwise.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TokenPair, ApiError>> + Send;

    /// Create an account. Does not authenticate.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the registration.
    fn register(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Account, ApiError>> + Send;

    /// Create the profile of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn create_profile(
        &self,
        token: &str,
        profile: &NewProfile,
    ) -> impl Future<Output = Result<Profile, ApiError>> + Send;

    /// Replace nickname and optionally avatar of a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<Profile, ApiError>> + Send;

    /// Profile of the authenticated user.
    ///
    /// # Errors
    ///
    /// [`ApiError::EmptyCollection`] when the backend returns no profile.
    fn my_profile(&self, token: &str) -> impl Future<Output = Result<Profile, ApiError>> + Send;

    /// All profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn profiles(&self, token: &str)
    -> impl Future<Output = Result<Vec<Profile>, ApiError>> + Send;

    /// All reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn reviews(&self, token: &str) -> impl Future<Output = Result<Vec<Review>, ApiError>> + Send;

    /// Publish a review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn create_review(
        &self,
        token: &str,
        review: &NewReview,
    ) -> impl Future<Output = Result<Review, ApiError>> + Send;

    /// Apply a planned like change and return the updated review.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn update_likes(
        &self,
        token: &str,
        change: &LikeChange,
    ) -> impl Future<Output = Result<Review, ApiError>> + Send;

    /// All comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn comments(&self, token: &str)
    -> impl Future<Output = Result<Vec<Comment>, ApiError>> + Send;

    /// Post a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    fn create_comment(
        &self,
        token: &str,
        comment: &NewComment,
    ) -> impl Future<Output = Result<Comment, ApiError>> + Send;
}
