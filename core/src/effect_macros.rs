//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use fscomics_core::async_effect;
///
/// async_effect! {
///     let reviews = api.reviews(&token).await.ok()?;
///     Some(ReviewAction::RequestSucceeded { id, response: ReviewResponse::ReviewsLoaded(reviews) })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
