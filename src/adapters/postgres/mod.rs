//! PostgreSQL adapters for the pack, subscription and clip stores.
//!
//! Every identity-keyed write is a single conditional statement
//! (`ON CONFLICT DO NOTHING`, `UPDATE ... WHERE version = $n`).

mod clip_store;
mod pack_store;
mod subscription_store;

pub use clip_store::PostgresClipStore;
pub use pack_store::PostgresPackStore;
pub use subscription_store::PostgresSubscriptionStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens the connection pool described by the config.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(&config.url)
        .await
        .map_err(db_error("connect to database"))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
        info!("Database migrations applied");
    }

    Ok(pool)
}

fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}
