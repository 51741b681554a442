//! # Blogly Infrastructure
//!
//! Concrete implementations of the storage ports defined in `blogly-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - SQL storage via SeaORM
//! - `minimal` - No database driver, in-memory store only

pub mod database;

pub use database::{DatabaseConfig, InMemoryBlogStore};

#[cfg(feature = "postgres")]
pub use database::{DatabasePool, SqlBlogStore};
