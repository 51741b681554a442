use std::collections::{BTreeSet, HashMap};

use super::{BlogService, EditPostContext, NewPostContext, PostDetails};
use crate::domain::{NewPost, Post, PostWithAuthor};
use crate::error::DomainError;

const ENTITY: &str = "Post";

/// Drop repeated ids so each association is written once.
fn distinct(tag_ids: &[i32]) -> Vec<i32> {
    tag_ids
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl BlogService {
    pub async fn get_post(&self, id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn post_details(&self, id: i32) -> Result<PostDetails, DomainError> {
        let post = self.get_post(id).await?;
        let author = self.get_user(post.user_id).await?;
        let tags = self.tags.find_by_post_id(id).await?;
        Ok(PostDetails { post, author, tags })
    }

    pub async fn new_post_context(&self, user_id: i32) -> Result<NewPostContext, DomainError> {
        let user = self.get_user(user_id).await?;
        let tags = self.tags.list().await?;
        Ok(NewPostContext { user, tags })
    }

    pub async fn edit_post_context(&self, id: i32) -> Result<EditPostContext, DomainError> {
        let post = self.get_post(id).await?;
        let tags = self.tags.list().await?;
        let selected = self.posts.tag_ids(id).await?;
        Ok(EditPostContext {
            post,
            tags,
            selected,
        })
    }

    /// The newest posts, each with its author.
    pub async fn recent_posts(&self, limit: u64) -> Result<Vec<PostWithAuthor>, DomainError> {
        let posts = self.posts.recent(limit).await?;
        let authors: HashMap<i32, _> = self
            .users
            .list()
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        posts
            .into_iter()
            .map(|post| match authors.get(&post.user_id) {
                Some(author) => Ok(PostWithAuthor {
                    author: author.clone(),
                    post,
                }),
                None => Err(DomainError::not_found("User", post.user_id)),
            })
            .collect()
    }

    /// Create a post for an existing user, tagged with `tag_ids`.
    pub async fn create_post(
        &self,
        user_id: i32,
        title: &str,
        content: &str,
        tag_ids: &[i32],
    ) -> Result<Post, DomainError> {
        let new_post = NewPost::new(user_id, title, content)?;
        self.get_user(user_id).await?;

        let post = self
            .posts
            .insert_with_tags(new_post, &distinct(tag_ids))
            .await?;
        tracing::info!(post_id = post.id, user_id, tags = tag_ids.len(), "Post created");
        Ok(post)
    }

    /// Rewrite a post and make its tags exactly `tag_ids`.
    pub async fn edit_post(
        &self,
        id: i32,
        title: &str,
        content: &str,
        tag_ids: &[i32],
    ) -> Result<Post, DomainError> {
        let mut post = self.get_post(id).await?;
        post.rewrite(title, content)?;

        let post = self
            .posts
            .update_with_tags(post, &distinct(tag_ids))
            .await
            .map_err(|e| e.for_entity(ENTITY, id))?;
        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    /// Delete a post and its tag associations. Returns the removed post.
    pub async fn delete_post(&self, id: i32) -> Result<Post, DomainError> {
        let post = self.get_post(id).await?;
        self.posts
            .delete_cascade(id)
            .await
            .map_err(|e| e.for_entity(ENTITY, id))?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::distinct;

    #[test]
    fn test_distinct_sorts_and_dedups() {
        assert_eq!(distinct(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(distinct(&[]).is_empty());
    }
}
