//! Schema migrations for the blog database.
//!
//! Foreign keys are declared without `ON DELETE CASCADE`: the database refuses
//! to delete a parent row while children still point at it, and the
//! application removes children first.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_posts_table;
mod m20240101_000003_create_tags_table;
mod m20240101_000004_create_posts_tags_table;
pub mod seed;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_posts_table::Migration),
            Box::new(m20240101_000003_create_tags_table::Migration),
            Box::new(m20240101_000004_create_posts_tags_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blogly_core::DomainError;
    use blogly_infra::SqlBlogStore;
    use sea_orm_migration::sea_orm::Database;

    use super::*;

    #[tokio::test]
    async fn test_migrated_schema_enforces_constraints() {
        let db = Arc::new(Database::connect("sqlite::memory:").await.unwrap());
        Migrator::up(db.as_ref(), None).await.unwrap();

        let service = SqlBlogStore::new(Arc::clone(&db)).service();
        let user = service.create_user("Test", Some("Case"), None).await.unwrap();
        service.create_tag("music").await.unwrap();

        assert!(matches!(
            service.create_tag("MUSIC").await,
            Err(DomainError::Constraint(_))
        ));
        assert!(matches!(
            service.create_post(user.id, "Blogly", "Hello there.", &[42]).await,
            Err(DomainError::Constraint(_))
        ));

        Migrator::down(db.as_ref(), None).await.unwrap();
        assert!(Migrator::get_applied_migrations(db.as_ref()).await.unwrap().is_empty());
    }
}
