//! SQL repository implementations.
//!
//! Every mutation that touches more than one row runs inside a single
//! transaction. Returning early drops the transaction, which rolls it back.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ActiveValue::Unchanged;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use blogly_core::BlogService;
use blogly_core::domain::{NewPost, NewUser, Post, Tag, TagDiff, User};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::error::map_db_err;
use super::sql_base::SqlBaseRepository;

/// SQL user repository.
pub type SqlUserRepository = SqlBaseRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

/// SQL tag repository.
pub type SqlTagRepository = SqlBaseRepository<TagEntity>;

/// The three SQL repositories, sharing one connection pool.
#[derive(Clone)]
pub struct SqlBlogStore {
    pub users: Arc<SqlUserRepository>,
    pub posts: Arc<SqlPostRepository>,
    pub tags: Arc<SqlTagRepository>,
}

impl SqlBlogStore {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            users: Arc::new(SqlUserRepository::new(Arc::clone(&db))),
            posts: Arc::new(SqlPostRepository::new(Arc::clone(&db))),
            tags: Arc::new(SqlTagRepository::new(db)),
        }
    }

    /// Build a service backed by these repositories.
    pub fn service(&self) -> BlogService {
        BlogService::new(self.users.clone(), self.posts.clone(), self.tags.clone())
    }
}

/// IDs of every post owned by `user_id`.
async fn post_ids_of_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<i32>, DbErr> {
    PostEntity::find()
        .select_only()
        .column(post::Column::Id)
        .filter(post::Column::UserId.eq(user_id))
        .into_tuple()
        .all(db)
        .await
}

/// IDs of every tag attached to `post_id`.
async fn tag_ids_of_post<C: ConnectionTrait>(db: &C, post_id: i32) -> Result<Vec<i32>, DbErr> {
    PostTagEntity::find()
        .select_only()
        .column(post_tag::Column::TagId)
        .filter(post_tag::Column::PostId.eq(post_id))
        .order_by_asc(post_tag::Column::TagId)
        .into_tuple()
        .all(db)
        .await
}

/// Insert one association row per tag id.
async fn attach_tags<C: ConnectionTrait>(db: &C, post_id: i32, tag_ids: &[i32]) -> Result<(), DbErr> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    let rows = tag_ids.iter().map(|&tag_id| post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
    });
    PostTagEntity::insert_many(rows)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let post_ids = post_ids_of_user(&txn, id).await.map_err(map_db_err)?;
        tracing::debug!(user_id = id, posts = post_ids.len(), "Deleting user with posts");

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        PostEntity::delete_many()
            .filter(post::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_tag_id(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn tag_ids(&self, post_id: i32) -> Result<Vec<i32>, RepoError> {
        tag_ids_of_post(self.db.as_ref(), post_id).await.map_err(map_db_err)
    }

    async fn insert_with_tags(&self, post: NewPost, tag_ids: &[i32]) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel::from(post)
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        attach_tags(&txn, model.id, tag_ids)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update_with_tags(&self, post: Post, tag_ids: &[i32]) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(map_db_err)?;

        let current = tag_ids_of_post(&txn, model.id).await.map_err(map_db_err)?;
        let diff = TagDiff::between(&current, tag_ids);
        tracing::debug!(
            post_id = model.id,
            added = ?diff.added,
            removed = ?diff.removed,
            "Reconciling post tags"
        );

        if !diff.removed.is_empty() {
            PostTagEntity::delete_many()
                .filter(post_tag::Column::PostId.eq(model.id))
                .filter(post_tag::Column::TagId.is_in(diff.removed.iter().copied()))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }
        attach_tags(&txn, model.id, &diff.added)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, name: String) -> Result<Tag, RepoError> {
        tracing::debug!(tag = %name, "Inserting tag");

        let model = tag::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = TagEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }
}
