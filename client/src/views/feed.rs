//! Review feed.
//!
//! Reviews are shown newest first, which is the reverse of the cached
//! order. Authors, likers, and commenters are resolved through the profile
//! whose `userProfile` matches the user id on the record.

use crate::app::AppState;
use fscomics_api::{Profile, Review, ReviewId, UserId};
use std::fmt;

/// Most liker avatars shown on a card before collapsing into a counter
pub const MAX_LIKER_AVATARS: usize = 7;

/// Who wrote or liked something
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    /// Nickname, empty when the profile is unknown
    pub nick_name: String,
    /// Avatar URL
    pub avatar: Option<String>,
}

impl Person {
    fn resolve(profiles: &[Profile], user: UserId) -> Self {
        profiles
            .iter()
            .find(|p| p.user_profile == user)
            .map(|p| Self {
                nick_name: p.nick_name.clone(),
                avatar: p.avatar.clone(),
            })
            .unwrap_or_default()
    }
}

/// One comment under a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    /// Commenter
    pub author: Person,
    /// Comment body
    pub text: String,
}

/// One review in the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    /// Review id, used by the like and comment actions
    pub id: ReviewId,
    /// Review author
    pub author: Person,
    /// Review title
    pub title: String,
    /// Cover image URL
    pub img: Option<String>,
    /// Title of the reviewed book
    pub book_name: String,
    /// Review body
    pub content: String,
    /// Whether the session user likes this review
    pub liked_by_me: bool,
    /// Liker avatars shown
    pub likers: Vec<Person>,
    /// Likers collapsed into the "+N" counter
    pub hidden_likers: usize,
    /// Comments on this review
    pub comments: Vec<CommentLine>,
}

impl ReviewCard {
    fn build(state: &AppState, review: &Review) -> Self {
        let profiles = &state.auth.profiles;
        let me = state.auth.my_profile.user_profile;

        // Like an avatar group: at most the maximum, else one slot becomes "+N"
        let shown = if review.liked_user.len() > MAX_LIKER_AVATARS {
            MAX_LIKER_AVATARS - 1
        } else {
            review.liked_user.len()
        };

        Self {
            id: review.id,
            author: Person::resolve(profiles, review.user_review),
            title: review.title.clone(),
            img: review.img.clone(),
            book_name: review.book_name.clone(),
            content: review.content.clone(),
            liked_by_me: review.is_liked_by(me),
            likers: review.liked_user[..shown]
                .iter()
                .map(|user| Person::resolve(profiles, *user))
                .collect(),
            hidden_likers: review.liked_user.len() - shown,
            comments: state
                .review
                .comments_on(review.id)
                .map(|comment| CommentLine {
                    author: Person::resolve(profiles, comment.user_comment),
                    text: comment.text.clone(),
                })
                .collect(),
        }
    }
}

/// The feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedView {
    /// Cards, newest first
    pub cards: Vec<ReviewCard>,
}

impl FeedView {
    /// Derive the feed; `None` while nobody is logged in
    #[must_use]
    pub fn from_state(state: &AppState) -> Option<Self> {
        if !state.auth.is_authenticated() {
            return None;
        }

        let cards = state
            .review
            .reviews
            .iter()
            .rev()
            .filter(|review| !review.title.is_empty())
            .map(|review| ReviewCard::build(state, review))
            .collect();

        Some(Self { cards })
    }
}

impl fmt::Display for ReviewCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {} - by {}", self.id, self.title, self.author.nick_name)?;
        if let Some(img) = &self.img {
            writeln!(f, "  image: {img}")?;
        }
        writeln!(f, "  book: {}", self.book_name)?;
        writeln!(f, "  {}", self.content)?;

        let heart = if self.liked_by_me { "♥" } else { "♡" };
        let likers: Vec<&str> = self.likers.iter().map(|p| p.nick_name.as_str()).collect();
        write!(f, "  {heart} {}", likers.join(", "))?;
        if self.hidden_likers > 0 {
            write!(f, " +{}", self.hidden_likers)?;
        }
        writeln!(f)?;

        for comment in &self.comments {
            writeln!(f, "    {}: {}", comment.author.nick_name, comment.text)?;
        }
        Ok(())
    }
}

impl fmt::Display for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return writeln!(f, "(no reviews yet)");
        }
        for card in &self.cards {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}
