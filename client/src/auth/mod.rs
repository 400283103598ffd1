//! Auth slice: login/signup/profile modals, the loading flag, and profiles.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::{AuthAction, AuthOperation, AuthRequest, AuthResponse};
pub use reducer::AuthReducer;
pub use state::{AuthModal, AuthState};
