//! Reset the database and fill it with sample data.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use sea_orm_migration::sea_orm::Database;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let Ok(url) = env::var("DATABASE_URL") else {
        tracing::error!("DATABASE_URL must be set to seed the database");
        return ExitCode::FAILURE;
    };

    let db = match Database::connect(url.as_str()).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match migration::seed::reset_and_seed(Arc::new(db)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
