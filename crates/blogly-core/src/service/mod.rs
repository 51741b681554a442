//! Mutation service - the operations the presentation layer calls.
//!
//! Each mutation is a single call into a repository port, and every port
//! method that touches more than one row runs as one transaction. A failed
//! mutation therefore never leaves orphaned posts or tag associations behind.

mod posts;
mod tags;
mod users;

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Post, Tag, User};
use crate::ports::{PostRepository, TagRepository, UserRepository};

/// Entry point for every blog operation.
///
/// Holds explicit handles to the storage ports; nothing is read from ambient
/// global state.
#[derive(Clone)]
pub struct BlogService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl BlogService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self { users, posts, tags }
    }
}

/// A user with the posts they own.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetails {
    pub user: User,
    pub posts: Vec<Post>,
}

/// A post with its author and tags.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetails {
    pub post: Post,
    pub author: User,
    pub tags: Vec<Tag>,
}

/// What the "new post" form needs: the owner and every tag to choose from.
#[derive(Debug, Clone, Serialize)]
pub struct NewPostContext {
    pub user: User,
    pub tags: Vec<Tag>,
}

/// What the "edit post" form needs.
#[derive(Debug, Clone, Serialize)]
pub struct EditPostContext {
    pub post: Post,
    pub tags: Vec<Tag>,
    pub selected: Vec<i32>,
}

/// A tag with the posts carrying it.
#[derive(Debug, Clone, Serialize)]
pub struct TagDetails {
    pub tag: Tag,
    pub posts: Vec<Post>,
}
