use super::{BlogService, UserDetails};
use crate::domain::{NewUser, User, UserChanges};
use crate::error::DomainError;

const ENTITY: &str = "User";

impl BlogService {
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.list().await?)
    }

    pub async fn get_user(&self, id: i32) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn user_details(&self, id: i32) -> Result<UserDetails, DomainError> {
        let user = self.get_user(id).await?;
        let posts = self.posts.find_by_user_id(id).await?;
        Ok(UserDetails { user, posts })
    }

    /// Create a user. Empty last name and image fall back to their defaults.
    pub async fn create_user(
        &self,
        first: &str,
        last: Option<&str>,
        image: Option<&str>,
    ) -> Result<User, DomainError> {
        let new_user = NewUser::new(first, last, image)?;
        let user = self.users.insert(new_user).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Overwrite only the fields given as non-empty input.
    pub async fn edit_user(
        &self,
        id: i32,
        first: Option<&str>,
        last: Option<&str>,
        image: Option<&str>,
    ) -> Result<User, DomainError> {
        let mut user = self.get_user(id).await?;
        user.apply(UserChanges::from_input(first, last, image));

        let user = self
            .users
            .update(user)
            .await
            .map_err(|e| e.for_entity(ENTITY, id))?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    /// Delete a user along with every post they own.
    pub async fn delete_user(&self, id: i32) -> Result<(), DomainError> {
        self.users
            .delete_cascade(id)
            .await
            .map_err(|e| e.for_entity(ENTITY, id))?;
        tracing::info!(user_id = id, "User deleted with their posts");
        Ok(())
    }
}
