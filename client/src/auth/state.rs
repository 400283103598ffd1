//! State of the auth slice.

use fscomics_api::{Profile, ProfileId};
use std::fmt;

/// Modal dialogs owned by the auth slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthModal {
    /// Log in with email and password
    Login,
    /// Create an account
    Signup,
    /// Edit nickname and avatar
    Profile,
}

impl fmt::Display for AuthModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Signup => write!(f, "signup"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

/// Session, profile, and auth-modal state
///
/// `my_profile` holds the placeholder profile (`id == 0`, empty nickname)
/// until a profile of the current session has been loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// Login modal visible
    pub open_login: bool,
    /// Signup modal visible
    pub open_signup: bool,
    /// Edit-profile modal visible
    pub open_profile: bool,
    /// An auth workflow is running
    pub is_loading_auth: bool,
    /// Profile of the current session
    pub my_profile: Profile,
    /// Every known profile
    pub profiles: Vec<Profile>,
    /// Reason of the last failed request, cleared by the next success
    pub last_error: Option<String>,
}

impl Default for AuthState {
    /// The login modal starts open
    fn default() -> Self {
        Self {
            open_login: true,
            open_signup: false,
            open_profile: false,
            is_loading_auth: false,
            my_profile: Profile::default(),
            profiles: Vec::new(),
            last_error: None,
        }
    }
}

impl AuthState {
    /// Whether `modal` is open
    #[must_use]
    pub const fn is_open(&self, modal: AuthModal) -> bool {
        match modal {
            AuthModal::Login => self.open_login,
            AuthModal::Signup => self.open_signup,
            AuthModal::Profile => self.open_profile,
        }
    }

    pub(crate) fn set_open(&mut self, modal: AuthModal, open: bool) {
        match modal {
            AuthModal::Login => self.open_login = open,
            AuthModal::Signup => self.open_signup = open,
            AuthModal::Profile => self.open_profile = open,
        }
    }

    /// Views treat a non-empty nickname as "logged in"
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.my_profile.nick_name.is_empty()
    }

    /// Profile with the given id
    #[must_use]
    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Replace the cached profile with the same id; absent ids are ignored
    pub(crate) fn replace_profile(&mut self, updated: &Profile) {
        if let Some(existing) = self.profiles.iter_mut().find(|p| p.id == updated.id) {
            *existing = updated.clone();
        }
    }
}
