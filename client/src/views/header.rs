//! Header bar.

use crate::app::AppState;
use std::fmt;

/// What the header shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderView {
    /// Compose and logout buttons plus the session user's avatar
    SignedIn {
        /// Session user's nickname
        nick_name: String,
        /// Session user's avatar URL
        avatar: Option<String>,
        /// Spinner visible
        loading: bool,
    },
    /// Login and signup buttons
    SignedOut {
        /// Spinner visible
        loading: bool,
    },
}

impl HeaderView {
    /// Derive the header from state
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let loading = state.is_loading();

        if state.auth.is_authenticated() {
            Self::SignedIn {
                nick_name: state.auth.my_profile.nick_name.clone(),
                avatar: state.auth.my_profile.avatar.clone(),
                loading,
            }
        } else {
            Self::SignedOut { loading }
        }
    }
}

impl fmt::Display for HeaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FSComics")?;
        match self {
            Self::SignedIn {
                nick_name,
                avatar,
                loading,
            } => {
                write!(f, " | [new review] [logout] | {nick_name}")?;
                if let Some(avatar) = avatar {
                    write!(f, " ({avatar})")?;
                }
                if *loading {
                    write!(f, " …")?;
                }
            },
            Self::SignedOut { loading } => {
                write!(f, " | [login] [signup]")?;
                if *loading {
                    write!(f, " …")?;
                }
            },
        }
        Ok(())
    }
}
