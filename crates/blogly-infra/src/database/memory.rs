//! In-memory entity store - used as fallback when no database is configured.
//!
//! All four relations live behind one async `RwLock`. Each mutation holds the
//! write lock from its first check to its last write, so it is atomic, and it
//! enforces the same foreign-key and uniqueness rules as the SQL schema.
//! Note: Data is lost on process restart.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blogly_core::BlogService;
use blogly_core::domain::{NewPost, NewUser, Post, Tag, TagDiff, User};
use blogly_core::error::RepoError;
use blogly_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    tags: BTreeMap<i32, Tag>,
    /// (post_id, tag_id)
    post_tags: BTreeSet<(i32, i32)>,
    last_user_id: i32,
    last_post_id: i32,
    last_tag_id: i32,
}

impl Tables {
    fn check_user(&self, user_id: i32) -> Result<(), RepoError> {
        if self.users.contains_key(&user_id) {
            Ok(())
        } else {
            Err(RepoError::Constraint(format!(
                "foreign key constraint: posts.user_id = {user_id} has no user"
            )))
        }
    }

    fn check_tags(&self, tag_ids: &[i32]) -> Result<(), RepoError> {
        match tag_ids.iter().find(|id| !self.tags.contains_key(id)) {
            Some(id) => Err(RepoError::Constraint(format!(
                "foreign key constraint: posts_tags.tag_id = {id} has no tag"
            ))),
            None => Ok(()),
        }
    }

    fn check_unique_name(&self, name: &str, except: Option<i32>) -> Result<(), RepoError> {
        let taken = self
            .tags
            .values()
            .any(|tag| tag.name == name && Some(tag.id) != except);
        if taken {
            return Err(RepoError::Constraint(format!(
                "unique constraint: tags.name = {name}"
            )));
        }
        Ok(())
    }

    fn tag_ids_of(&self, post_id: i32) -> Vec<i32> {
        self.post_tags
            .range((post_id, i32::MIN)..=(post_id, i32::MAX))
            .map(|&(_, tag_id)| tag_id)
            .collect()
    }

    fn detach_post(&mut self, post_id: i32) {
        self.post_tags.retain(|&(p, _)| p != post_id);
    }

    fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

/// In-memory store holding all blog relations.
#[derive(Clone, Default)]
pub struct InMemoryBlogStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn tags(&self) -> InMemoryTagRepository {
        InMemoryTagRepository {
            tables: self.tables.clone(),
        }
    }

    /// Build a service backed by this store.
    pub fn service(&self) -> BlogService {
        BlogService::new(
            Arc::new(self.users()),
            Arc::new(self.posts()),
            Arc::new(self.tags()),
        )
    }

    /// Number of post-tag associations, for integrity checks.
    pub async fn association_count(&self) -> usize {
        self.tables.read().await.post_tags.len()
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

/// In-memory tag repository.
pub struct InMemoryTagRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let stored = tables.users.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *stored = user.clone();
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let mut users: Vec<User> = self.tables.read().await.users.values().cloned().collect();
        // Missing last names sort after present ones, as NULLs do in Postgres.
        users.sort_by(|a, b| {
            (a.last_name.is_none(), &a.last_name)
                .cmp(&(b.last_name.is_none(), &b.last_name))
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(users)
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        tables.last_user_id += 1;

        let user = User {
            id: tables.last_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            image: user.image,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(RepoError::NotFound);
        }

        let owned: Vec<i32> = tables
            .posts
            .values()
            .filter(|post| post.user_id == id)
            .map(|post| post.id)
            .collect();
        for post_id in owned {
            tables.detach_post(post_id);
            tables.posts.remove(&post_id);
        }
        tables.users.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_user(post.user_id)?;
        let stored = tables.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *stored = post.clone();
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let posts = tables
            .posts
            .values()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect();
        Ok(Tables::newest_first(posts))
    }

    async fn find_by_tag_id(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let posts = tables
            .post_tags
            .iter()
            .filter(|&&(_, t)| t == tag_id)
            .filter_map(|(post_id, _)| tables.posts.get(post_id).cloned())
            .collect();
        Ok(Tables::newest_first(posts))
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let posts = Tables::newest_first(tables.posts.values().cloned().collect());
        Ok(posts.into_iter().take(limit as usize).collect())
    }

    async fn tag_ids(&self, post_id: i32) -> Result<Vec<i32>, RepoError> {
        Ok(self.tables.read().await.tag_ids_of(post_id))
    }

    async fn insert_with_tags(&self, post: NewPost, tag_ids: &[i32]) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_user(post.user_id)?;
        tables.check_tags(tag_ids)?;

        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            user_id: post.user_id,
        };
        tables.posts.insert(post.id, post.clone());
        tables
            .post_tags
            .extend(tag_ids.iter().map(|&tag_id| (post.id, tag_id)));
        Ok(post)
    }

    async fn update_with_tags(&self, post: Post, tag_ids: &[i32]) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_tags(tag_ids)?;

        let diff = TagDiff::between(&tables.tag_ids_of(post.id), tag_ids);
        for tag_id in &diff.removed {
            tables.post_tags.remove(&(post.id, *tag_id));
        }
        for tag_id in &diff.added {
            tables.post_tags.insert((post.id, *tag_id));
        }

        let stored = tables.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        stored.title = post.title;
        stored.content = post.content;
        Ok(stored.clone())
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.detach_post(id);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Tag, i32> for InMemoryTagRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn update(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.tags.contains_key(&tag.id) {
            return Err(RepoError::NotFound);
        }
        tables.check_unique_name(&tag.name, Some(tag.id))?;
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let mut tags: Vec<Tag> = self.tables.read().await.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .tag_ids_of(post_id)
            .into_iter()
            .filter_map(|id| tables.tags.get(&id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn insert(&self, name: String) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        tables.check_unique_name(&name, None)?;

        tables.last_tag_id += 1;
        let tag = Tag {
            id: tables.last_tag_id,
            name,
        };
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn delete_cascade(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.post_tags.retain(|&(_, tag_id)| tag_id != id);
        Ok(())
    }
}
