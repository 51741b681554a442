//! Domain entities - the core business objects.

mod post;
mod tag;
mod user;

pub use post::{DISPLAY_FORMAT, NewPost, Post, PostWithAuthor, format_timestamp};
pub use tag::{Tag, TagDiff};
pub use user::{DEFAULT_IMAGE_URL, NewUser, User, UserChanges};

use crate::error::DomainError;

/// Trim a required text field, rejecting it when nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Trim an optional text field; empty input counts as absent.
pub(crate) fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
