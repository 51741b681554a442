//! Application state - shared across all handlers.

use std::sync::Arc;

use blogly_core::BlogService;
use blogly_infra::{DatabaseConfig, InMemoryBlogStore};

#[cfg(feature = "postgres")]
use blogly_infra::{DatabasePool, SqlBlogStore};

use crate::templates::{MiniJinjaEngine, TemplateEngine};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: BlogService,
    pub templates: Arc<dyn TemplateEngine>,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabasePool>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>, run_migrations: bool) -> Self {
        #[cfg(feature = "postgres")]
        let (db, service) = {
            if let Some(config) = db_config {
                match connect(config, run_migrations).await {
                    Ok(pool) => {
                        let service = SqlBlogStore::new(pool.shared()).service();
                        (Some(pool), service)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to prepare database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, InMemoryBlogStore::new().service())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, InMemoryBlogStore::new().service())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let service = {
            let _ = (db_config, run_migrations);
            tracing::info!("Running without postgres feature - using in-memory store");
            InMemoryBlogStore::new().service()
        };

        tracing::info!("Application state initialized");

        Self {
            service,
            templates: Arc::new(MiniJinjaEngine::new()),
            #[cfg(feature = "postgres")]
            db,
        }
    }

    /// State backed by a fresh in-memory store.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            service: InMemoryBlogStore::new().service(),
            templates: Arc::new(MiniJinjaEngine::new()),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Which entity store serves requests.
    pub fn storage(&self) -> &'static str {
        #[cfg(feature = "postgres")]
        if self.db.is_some() {
            return "database";
        }
        "memory"
    }
}

#[cfg(feature = "postgres")]
async fn connect(
    config: &DatabaseConfig,
    run_migrations: bool,
) -> Result<DatabasePool, migration::DbErr> {
    use migration::{Migrator, MigratorTrait};

    let pool = DatabasePool::init(config).await?;
    if run_migrations {
        Migrator::up(pool.conn(), None).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(pool)
}
