//! # FSComics client
//!
//! Client for the FSComics book-review service: log in, browse reviews
//! newest first, like them, comment on them, and publish your own.
//!
//! The client is built from two state slices driven by one store:
//!
//! - [`auth`]: login/signup/profile modals, the auth loading flag, the
//!   session user's profile, and every profile
//! - [`review`]: reviews, comments, like toggling, and the compose modal
//!
//! [`app`] combines the slices behind [`AppState`] and [`AppAction`].
//! [`Client`] runs the multi-step flows (boot, login, signup, posting)
//! on top of the store, and [`views`] projects the state into the header
//! and feed.
//!
//! ## Quick start
//!
//! ```no_run
//! use fscomics::{BootOutcome, Client, Config, FileSessionStore};
//! use fscomics_api::BackendClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let client = Client::new(
//!     BackendClient::new(config.api_url.clone()),
//!     FileSessionStore::new(config.session_file.clone()),
//!     config.client_settings(),
//! );
//!
//! if client.boot().await? == BootOutcome::Ready {
//!     println!("{}", client.header().await);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod environment;
pub mod error;
pub mod request;
pub mod review;
pub mod session;
pub mod views;
pub mod workflows;

pub use app::{AppAction, AppReducer, AppState, AppStore};
pub use config::Config;
pub use environment::AppEnvironment;
pub use error::{ClientError, ConfigError, RequestError};
pub use request::RequestId;
pub use session::FileSessionStore;
pub use views::{CommentForm, CredentialsForm, FeedView, HeaderView, NewReviewForm, ProfileForm};
pub use workflows::{BootOutcome, Client, ClientSettings};
