//! Sample data for a fresh database.

use std::sync::Arc;

use blogly_core::{BlogService, DomainError};
use blogly_infra::SqlBlogStore;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbConn;

use crate::Migrator;

/// Errors raised while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Schema reset failed: {0}")]
    Schema(DbErr),

    #[error("Inserting sample data failed: {0}")]
    Data(DomainError),
}

/// Drop every table, migrate from scratch, and insert the sample data.
pub async fn reset_and_seed(db: Arc<DbConn>) -> Result<(), SeedError> {
    Migrator::fresh(db.as_ref())
        .await
        .map_err(SeedError::Schema)?;
    seed(&SqlBlogStore::new(db).service())
        .await
        .map_err(SeedError::Data)
}

/// Insert sample users, posts and tags through the mutation service.
pub async fn seed(service: &BlogService) -> Result<(), DomainError> {
    let matty = service
        .create_user(
            "Matthew",
            Some("Yglesias"),
            Some("https://static01.nyt.com/images/2020/07/30/books/review/Salmon1/Salmon1-superJumbo.jpg?quality=90&auto=webp"),
        )
        .await?;
    let cher = service
        .create_user(
            "Cher",
            None,
            Some("https://i.guim.co.uk/img/media/34deec3b589c8b2d4e3aeb135d6be1f36393ccf6/0_4_2118_1270/master/2118.jpg?width=1300&quality=45&auto=format&fit=max&dpr=2&s=f43d40b80eb2611f61c8be5af24d7c44"),
        )
        .await?;
    service.create_user("Devlin", Some("Brush"), None).await?;

    let politics = service.create_tag("politics").await?;
    let music = service.create_tag("music").await?;

    service
        .create_post(
            matty.id,
            "1 Billion Americans",
            "There should be a lot of Americans. Slow boring is the name of my blog. It's ya boi Matt.",
            &[politics.id],
        )
        .await?;
    service
        .create_post(
            cher.id,
            "Do you Believe?",
            "In life after love. I can feel something inside myself.",
            &[music.id],
        )
        .await?;
    service
        .create_post(
            matty.id,
            "I'm back.",
            "It's me, Matt, and I'm back again. Legend in the blog game. Vox is weak.",
            &[politics.id],
        )
        .await?;

    tracing::info!("Seeded 3 users, 3 posts and 2 tags");
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::sea_orm::Database;

    use super::*;

    #[tokio::test]
    async fn test_reset_and_seed_twice() {
        let db = Arc::new(Database::connect("sqlite::memory:").await.unwrap());
        reset_and_seed(Arc::clone(&db)).await.unwrap();
        reset_and_seed(Arc::clone(&db)).await.unwrap();

        let service = SqlBlogStore::new(db).service();
        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 3);

        let tags = service.list_tags().await.unwrap();
        let politics = tags.iter().find(|t| t.name == "politics").unwrap();
        assert_eq!(service.tag_details(politics.id).await.unwrap().posts.len(), 2);
    }
}
