//! Form submissions accepted by the HTML front end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a submitted form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid tag id: {0}")]
    InvalidTagId(String),
}

/// New-user and edit-user form. Blank inputs arrive as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
    #[serde(default)]
    pub image: String,
}

/// New-post and edit-post form.
///
/// Tags are checkboxes sharing the name `tags`, so the body repeats the key
/// once per checked box. Parse it from key/value pairs with [`PostForm::from_pairs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub tags: Vec<i32>,
}

impl PostForm {
    pub fn from_pairs<I>(pairs: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "title" => form.title = value,
                "content" => form.content = value,
                "tags" => {
                    let id = value
                        .trim()
                        .parse()
                        .map_err(|_| FormError::InvalidTagId(value.clone()))?;
                    form.tags.push(id);
                }
                _ => {}
            }
        }
        Ok(form)
    }
}

/// New-tag and edit-tag form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagForm {
    #[serde(default)]
    pub name: String,
}
