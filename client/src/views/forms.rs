//! Form models with client-side validation.
//!
//! A form that fails validation never reaches the network; each failure is
//! reported per field.

use fscomics_api::{Credentials, NewComment, NewReview, ReviewId, Upload};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

/// One failed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Message shown next to the field
    pub message: String,
}

/// Validation failures of one form, ordered by field name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    /// Whether `field` failed
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// First message for `field`
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Every failure
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let errors = fields
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| FieldError {
                    field: field.to_string(),
                    message: failure
                        .message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), ToString::to_string),
                })
            })
            .collect();

        Self { errors }
    }
}

/// Login and signup form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CredentialsForm {
    /// Account email
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "email format is invalid")
    )]
    pub email: String,
    /// Account password
    #[validate(custom(function = "check_password"))]
    pub password: String,
}

/// Minimum password length, in characters
const MIN_PASSWORD_LEN: usize = 4;

/// Required first, then long enough; exactly one message per failure
fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed("password is required")));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("password must be at least 4 characters")));
    }
    Ok(())
}

impl CredentialsForm {
    /// Create a form from raw input
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validated request body
    ///
    /// # Errors
    ///
    /// Returns the per-field failures when the form is invalid.
    pub fn credentials(&self) -> Result<Credentials, FormErrors> {
        self.validate()?;
        Ok(Credentials::new(self.email.clone(), self.password.clone()))
    }
}

/// Compose-review form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct NewReviewForm {
    /// Review title
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    /// Title of the reviewed book
    #[validate(length(min = 1, message = "book name is required"))]
    pub book_name: String,
    /// Review body
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    /// Optional cover image
    pub img: Option<Upload>,
}

impl NewReviewForm {
    /// Validated request body
    ///
    /// # Errors
    ///
    /// Returns the per-field failures when a text field is empty.
    pub fn request(&self) -> Result<NewReview, FormErrors> {
        self.validate()?;
        Ok(NewReview {
            title: self.title.clone(),
            book_name: self.book_name.clone(),
            content: self.content.clone(),
            img: self.img.clone(),
        })
    }
}

/// Comment box under a review
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CommentForm {
    /// Comment body
    #[validate(length(min = 1, message = "comment is empty"))]
    pub text: String,
}

impl CommentForm {
    /// Validated request body for `review`
    ///
    /// # Errors
    ///
    /// Returns the failure when the text is empty.
    pub fn request(&self, review: ReviewId) -> Result<NewComment, FormErrors> {
        self.validate()?;
        Ok(NewComment {
            text: self.text.clone(),
            review,
        })
    }
}

/// Edit-profile form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ProfileForm {
    /// New nickname
    #[validate(length(min = 1, message = "nickname is required"))]
    pub nick_name: String,
}

impl ProfileForm {
    /// Check the form
    ///
    /// # Errors
    ///
    /// Returns the failure when the nickname is empty.
    pub fn check(&self) -> Result<(), FormErrors> {
        Ok(self.validate()?)
    }
}
