use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{User, required};
use crate::error::DomainError;

/// `strftime` format used when showing a post's creation time.
pub const DISPLAY_FORMAT: &str = "%a %b %-d %Y, %-I:%M %p";

/// Render a timestamp in [`DISPLAY_FORMAT`].
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(DISPLAY_FORMAT).to_string()
}

/// Post entity - a blog post written by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
}

impl Post {
    pub fn created_at_display(&self) -> String {
        format_timestamp(&self.created_at)
    }

    /// Replace title and content. Both are required.
    pub fn rewrite(&mut self, title: &str, content: &str) -> Result<(), DomainError> {
        self.title = required("title", title)?;
        self.content = required("content", content)?;
        Ok(())
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post, stamped with the current time.
    pub fn new(user_id: i32, title: &str, content: &str) -> Result<Self, DomainError> {
        Ok(Self {
            user_id,
            title: required("title", title)?,
            content: required("content", content)?,
            created_at: Utc::now(),
        })
    }
}

/// A post paired with the user who wrote it.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_new_post_stamps_each_call() {
        let first = NewPost::new(1, "Blogly", "Hello there.").unwrap();
        let second = NewPost::new(1, "Blogly", "Hello again.").unwrap();
        assert!(second.created_at >= first.created_at);
        assert!(Utc::now() >= second.created_at);
    }

    #[test]
    fn test_new_post_requires_title_and_content() {
        assert!(matches!(
            NewPost::new(1, "", "body"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            NewPost::new(1, "title", " "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_display_format() {
        let at = Utc.with_ymd_and_hms(2021, 1, 7, 15, 4, 0).unwrap();
        assert_eq!(format_timestamp(&at), "Thu Jan 7 2021, 3:04 PM");
    }
}
