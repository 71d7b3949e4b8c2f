use std::sync::Arc;

use anyhow::Result;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::Config;
use crate::store::{MemoryReviewStore, PgReviewStore, ReviewStore};

/// Schema embedded from `migrations/`, applied on startup before the store is used.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Picks the review store: PostgreSQL when `DATABASE_URL` is set, in-memory otherwise.
pub async fn open_store(config: &Config) -> Result<Arc<dyn ReviewStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            MIGRATOR.run(&pool).await?;
            info!("Database migrations applied");
            Ok(Arc::new(PgReviewStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            Ok(Arc::new(MemoryReviewStore::new()))
        }
    }
}
