use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, Tag, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity kind.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    ///
    /// Returns `RepoError::NotFound` when no row has the entity's ID.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// All users, ordered by last name then first name.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// Delete the user together with their posts and those posts' tag
    /// associations, as one atomic unit.
    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError>;
}

/// Post repository. Owns the post-tag join relation.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;

    async fn find_by_tag_id(&self, tag_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Newest posts first.
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// IDs of the tags currently attached to a post.
    async fn tag_ids(&self, post_id: i32) -> Result<Vec<i32>, RepoError>;

    /// Insert the post, then one association per tag id, atomically.
    async fn insert_with_tags(&self, post: NewPost, tag_ids: &[i32]) -> Result<Post, RepoError>;

    /// Overwrite title and content and make the post's tag set equal to
    /// `tag_ids`, atomically.
    async fn update_with_tags(&self, post: Post, tag_ids: &[i32]) -> Result<Post, RepoError>;

    /// Delete the post's tag associations, then the post, atomically.
    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i32> {
    /// All tags, ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Tag>, RepoError>;

    /// Insert a tag. The name must already be normalized.
    async fn insert(&self, name: String) -> Result<Tag, RepoError>;

    /// Delete the tag's post associations, then the tag, atomically.
    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError>;
}
