use serde::{Deserialize, Serialize};

use super::{present, required};
use crate::error::DomainError;

/// Profile image used when a user does not supply one.
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1601027847350-0285867c31f7?ixid=MXwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHw%3D&ixlib=rb-1.2.1&auto=format&fit=crop&w=668&q=80";

/// User entity - an author who owns posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub image: String,
}

impl User {
    /// First name, followed by the last name when there is one.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// Overwrite every field present in `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(first) = changes.first_name {
            self.first_name = first;
        }
        if let Some(last) = changes.last_name {
            self.last_name = Some(last);
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub image: String,
}

impl NewUser {
    /// Build a new user, applying the defaults for missing last name and image.
    pub fn new(first: &str, last: Option<&str>, image: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: required("first name", first)?,
            last_name: present(last),
            image: present(image).unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
        })
    }
}

/// Partial update for a user. `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

impl UserChanges {
    /// Empty inputs are treated the same as absent ones.
    pub fn from_input(first: Option<&str>, last: Option<&str>, image: Option<&str>) -> Self {
        Self {
            first_name: present(first),
            last_name: present(last),
            image: present(image),
        }
    }
}
