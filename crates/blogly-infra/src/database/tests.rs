use std::sync::Arc;

use blogly_core::domain::{Post, Tag, User};
use blogly_core::error::RepoError;
use blogly_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

use crate::database::entity::{post, tag, user};
use crate::database::sql_repo::{SqlPostRepository, SqlTagRepository, SqlUserRepository};

#[tokio::test]
async fn test_find_post_by_id() {
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: 3,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
            user_id: 1,
        }]])
        .into_connection();

    let repo = SqlPostRepository::new(Arc::new(db));

    let result: Option<Post> = repo.find_by_id(3).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 3);
    assert_eq!(post.created_at, now);
}

#[tokio::test]
async fn test_list_tags_orders_by_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            tag::Model {
                id: 2,
                name: "music".to_owned(),
            },
            tag::Model {
                id: 1,
                name: "politics".to_owned(),
            },
        ]])
        .into_connection();
    let db = Arc::new(db);

    let repo = SqlTagRepository::new(Arc::clone(&db));
    let tags: Vec<Tag> = repo.list().await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].name, "music");
    drop(repo);

    let db = Arc::try_unwrap(db).ok().unwrap();
    assert_eq!(
        db.into_transaction_log(),
        vec![Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "tags"."id", "tags"."name" FROM "tags" ORDER BY "tags"."name" ASC"#,
            []
        )]
    );
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = SqlUserRepository::new(Arc::new(db));
    let err = repo.delete_cascade(42).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_update_user_returns_stored_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: 1,
            first_name: "Cher".to_owned(),
            last_name: None,
            image: "https://example.com/cher.jpg".to_owned(),
        }]])
        .into_connection();

    let repo = SqlUserRepository::new(Arc::new(db));
    let user = repo
        .update(User {
            id: 1,
            first_name: "Cher".to_owned(),
            last_name: None,
            image: "https://example.com/cher.jpg".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(user.full_name(), "Cher");
}

#[tokio::test]
async fn test_posts_by_user_break_timestamp_ties_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();
    let db = Arc::new(db);

    let repo = SqlPostRepository::new(Arc::clone(&db));
    assert!(repo.find_by_user_id(7).await.unwrap().is_empty());
    drop(repo);

    let db = Arc::try_unwrap(db).ok().unwrap();
    assert_eq!(
        db.into_transaction_log(),
        vec![Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "posts"."id", "posts"."title", "posts"."content", "posts"."created_at", "posts"."user_id" FROM "posts" WHERE "posts"."user_id" = $1 ORDER BY "posts"."created_at" DESC, "posts"."id" DESC"#,
            [7i32.into()]
        )]
    );
}
