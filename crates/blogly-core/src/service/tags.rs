use super::{BlogService, TagDetails};
use crate::domain::Tag;
use crate::error::DomainError;

const ENTITY: &str = "Tag";

impl BlogService {
    pub async fn list_tags(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tags.list().await?)
    }

    pub async fn get_tag(&self, id: i32) -> Result<Tag, DomainError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn tag_details(&self, id: i32) -> Result<TagDetails, DomainError> {
        let tag = self.get_tag(id).await?;
        let posts = self.posts.find_by_tag_id(id).await?;
        Ok(TagDetails { tag, posts })
    }

    /// Create a tag. Fails with a constraint violation when the lower-cased
    /// name is already taken.
    pub async fn create_tag(&self, name: &str) -> Result<Tag, DomainError> {
        let name = Tag::normalize_name(name)?;
        let tag = self.tags.insert(name).await?;
        tracing::info!(tag_id = tag.id, tag = %tag.name, "Tag created");
        Ok(tag)
    }

    pub async fn edit_tag(&self, id: i32, name: &str) -> Result<Tag, DomainError> {
        let name = Tag::normalize_name(name)?;
        let mut tag = self.get_tag(id).await?;
        tag.name = name;

        let tag = self
            .tags
            .update(tag)
            .await
            .map_err(|e| e.for_entity(ENTITY, id))?;
        tracing::info!(tag_id = id, tag = %tag.name, "Tag renamed");
        Ok(tag)
    }

    /// Delete a tag after detaching it from every post.
    pub async fn delete_tag(&self, id: i32) -> Result<(), DomainError> {
        self.tags
            .delete_cascade(id)
            .await
            .map_err(|e| e.for_entity(ENTITY, id))?;
        tracing::info!(tag_id = id, "Tag deleted");
        Ok(())
    }
}
