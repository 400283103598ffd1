//! Actions of the auth slice.

use super::state::AuthModal;
use crate::error::RequestError;
use crate::request::RequestId;
use fscomics_api::{Account, Credentials, NewProfile, Profile, ProfileUpdate};
use std::fmt;

/// Asynchronous operations of the auth slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOperation {
    /// Exchange credentials for a session token
    Authenticate,
    /// Create an account
    Register,
    /// Create the profile of the session user
    CreateProfile,
    /// Change nickname and avatar
    UpdateProfile,
    /// Load the profile of the session user
    FetchMyProfile,
    /// Load every profile
    FetchProfiles,
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authenticate => "authenticate",
            Self::Register => "register",
            Self::CreateProfile => "create profile",
            Self::UpdateProfile => "update profile",
            Self::FetchMyProfile => "fetch my profile",
            Self::FetchProfiles => "fetch profiles",
        };
        f.write_str(name)
    }
}

/// Request payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    /// Log in; the returned access token becomes the session
    Authenticate(Credentials),
    /// Sign up; does not log in
    Register(Credentials),
    /// Create the session user's profile
    CreateProfile(NewProfile),
    /// Multipart profile update
    UpdateProfile(ProfileUpdate),
    /// First element of `api/myprofile/`
    FetchMyProfile,
    /// All profiles
    FetchProfiles,
}

impl AuthRequest {
    /// Operation this request starts
    #[must_use]
    pub const fn operation(&self) -> AuthOperation {
        match self {
            Self::Authenticate(_) => AuthOperation::Authenticate,
            Self::Register(_) => AuthOperation::Register,
            Self::CreateProfile(_) => AuthOperation::CreateProfile,
            Self::UpdateProfile(_) => AuthOperation::UpdateProfile,
            Self::FetchMyProfile => AuthOperation::FetchMyProfile,
            Self::FetchProfiles => AuthOperation::FetchProfiles,
        }
    }
}

/// Success payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResponse {
    /// Token persisted to the session store
    Authenticated,
    /// Account created
    Registered(Account),
    /// Profile created for the session user
    ProfileCreated(Profile),
    /// Profile after the update
    ProfileUpdated(Profile),
    /// Session user's profile
    MyProfileLoaded(Profile),
    /// Every profile
    ProfilesLoaded(Vec<Profile>),
}

impl AuthResponse {
    /// Operation this response completes
    #[must_use]
    pub const fn operation(&self) -> AuthOperation {
        match self {
            Self::Authenticated => AuthOperation::Authenticate,
            Self::Registered(_) => AuthOperation::Register,
            Self::ProfileCreated(_) => AuthOperation::CreateProfile,
            Self::ProfileUpdated(_) => AuthOperation::UpdateProfile,
            Self::MyProfileLoaded(_) => AuthOperation::FetchMyProfile,
            Self::ProfilesLoaded(_) => AuthOperation::FetchProfiles,
        }
    }
}

/// Every input the auth slice reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    // Synchronous transitions
    /// Show a modal
    ModalOpened(AuthModal),
    /// Hide a modal
    ModalClosed(AuthModal),
    /// Start or end the auth loading indicator
    LoadingSet(bool),
    /// Live edit of the session user's nickname
    NickNameEdited(String),

    // Asynchronous requests and their completions
    /// Start a backend request
    Requested {
        /// Correlates the completion with this request
        id: RequestId,
        /// What to send
        request: AuthRequest,
    },
    /// Request completed successfully
    RequestSucceeded {
        /// Id of the originating request
        id: RequestId,
        /// What came back
        response: AuthResponse,
    },
    /// Request failed
    RequestFailed {
        /// Id of the originating request
        id: RequestId,
        /// Operation that failed
        operation: AuthOperation,
        /// Why it failed
        error: RequestError,
    },
}

impl AuthAction {
    /// Whether this action completes request `id`, successfully or not
    #[must_use]
    pub fn completes(&self, id: RequestId) -> bool {
        match self {
            Self::RequestSucceeded { id: done, .. } | Self::RequestFailed { id: done, .. } => *done == id,
            _ => false,
        }
    }
}
