#[cfg(feature = "postgres")]
use std::sync::Arc;
#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every SQL statement at debug level.
    pub sql_logging: bool,
}

/// Pooled connection to the blog database.
///
/// Repositories share the connection through [`DatabasePool::shared`].
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct DatabasePool {
    conn: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabasePool {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection pool...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(config.sql_logging)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {}..{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    pub fn conn(&self) -> &DbConn {
        &self.conn
    }

    /// Another handle onto the same pool.
    pub fn shared(&self) -> Arc<DbConn> {
        Arc::clone(&self.conn)
    }

    /// Check that the database still answers.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}
