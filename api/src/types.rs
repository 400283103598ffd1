//! Wire types for the backend resources
//!
//! Field names follow the backend exactly: profiles carry `created_at`
//! while reviews carry `createdAt`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a backend user account
    UserId
);
id_type!(
    /// Identifier of a profile record
    ProfileId
);
id_type!(
    /// Identifier of a review
    ReviewId
);
id_type!(
    /// Identifier of a comment
    CommentId
);

/// A user's public profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Profile id
    pub id: ProfileId,
    /// Display name
    #[serde(rename = "nickName")]
    pub nick_name: String,
    /// Owning user
    #[serde(rename = "userProfile")]
    pub user_profile: UserId,
    /// Creation timestamp as sent by the backend
    #[serde(default)]
    pub created_at: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Profile {
    /// Whether this is the "nothing loaded" placeholder (`id == 0`, empty nickname)
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id == ProfileId(0) && self.nick_name.is_empty()
    }
}

/// A book review
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review id
    pub id: ReviewId,
    /// Review title
    pub title: String,
    /// Title of the reviewed book
    pub book_name: String,
    /// Review body
    pub content: String,
    /// Author (a `userProfile` id)
    pub user_review: UserId,
    /// Creation timestamp as sent by the backend
    #[serde(default)]
    pub created_at: String,
    /// Cover image URL
    #[serde(default)]
    pub img: Option<String>,
    /// Users who like this review
    #[serde(default)]
    pub liked_user: Vec<UserId>,
}

impl Review {
    /// Whether `user` is among the likers
    #[must_use]
    pub fn is_liked_by(&self, user: UserId) -> bool {
        self.liked_user.contains(&user)
    }
}

/// A comment on a review
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id
    pub id: CommentId,
    /// Comment body
    pub text: String,
    /// Commenter (a `userProfile` id)
    #[serde(rename = "userComment")]
    pub user_comment: UserId,
    /// Review the comment belongs to
    pub review: ReviewId,
}

/// Login or registration body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Token pair returned by `authen/jwt/create`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    /// Bearer token used for every authenticated request
    pub access: String,
    /// Refresh token (unused by the client)
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Acknowledgment of a created account
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Account {
    /// Account id, when the backend echoes it
    #[serde(default)]
    pub id: Option<UserId>,
    /// Account email
    #[serde(default)]
    pub email: String,
}

/// Body of `POST api/profile/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    /// Initial display name
    #[serde(rename = "nickName")]
    pub nick_name: String,
}

/// A file attached to a multipart request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name sent with the part
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// MIME type, if known
    pub mime: Option<String>,
}

impl Upload {
    /// Create an upload from raw bytes
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime: None,
        }
    }

    /// Attach a MIME type
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Body of `PUT api/profile/{id}/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Profile being updated
    pub id: ProfileId,
    /// New display name
    pub nick_name: String,
    /// New avatar; `None` keeps the current one
    pub avatar: Option<Upload>,
}

/// Body of `POST api/review/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Review title
    pub title: String,
    /// Title of the reviewed book
    pub book_name: String,
    /// Review body
    pub content: String,
    /// Optional cover image
    pub img: Option<Upload>,
}

/// Body of `POST api/comment/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    /// Comment body
    pub text: String,
    /// Review being commented on
    pub review: ReviewId,
}
