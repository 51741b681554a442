//! Entity store implementations and database connection management.

mod memory;
mod pool;

#[cfg(feature = "postgres")]
mod error;
#[cfg(feature = "postgres")]
mod sql_base;
#[cfg(feature = "postgres")]
pub mod sql_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use memory::{InMemoryBlogStore, InMemoryPostRepository, InMemoryTagRepository, InMemoryUserRepository};
pub use pool::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use pool::DatabasePool;
#[cfg(feature = "postgres")]
pub use sql_base::SqlBaseRepository;
#[cfg(feature = "postgres")]
pub use sql_repo::{SqlBlogStore, SqlPostRepository, SqlTagRepository, SqlUserRepository};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
