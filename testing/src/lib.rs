//! # FSComics Testing
//!
//! Testing utilities for the FSComics client.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for slice reducers
//! - [`mocks::MockBackend`]: In-memory backend that records every call
//! - [`mocks::InMemorySessionStore`]: Session token holder without a file
//!
//! ## Example
//!
//! ```ignore
//! use fscomics_testing::mocks::{InMemorySessionStore, MockBackend};
//!
//! #[tokio::test]
//! async fn test_boot_without_token() {
//!     let backend = MockBackend::new();
//!     let client = Client::new(backend.clone(), InMemorySessionStore::new(), timeout);
//!
//!     client.boot().await?;
//!
//!     assert!(backend.calls().is_empty());
//! }
//! ```

pub mod mocks;

pub use reducer_test::{assertions, collect_effect_actions, ReducerTest};
