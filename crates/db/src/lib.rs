//! Persistence layer for the users service.
//!
//! Holds the row models, the SQL repository, the [`UserGateway`] seam the
//! HTTP handlers talk to, and the pool bootstrap helpers.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod gateway;
pub mod models;
pub mod repositories;

pub use gateway::{PersistenceError, PgUserGateway, UserGateway, UserOperation};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Connect to the database, retrying at a fixed interval until it succeeds.
///
/// There is no attempt limit: the service is useless without its store, so
/// startup blocks here while the database comes up.
pub async fn connect_with_retry(
    database_url: &str,
    max_connections: u32,
    retry_interval: Duration,
) -> DbPool {
    let mut attempt: u32 = 1;
    loop {
        match create_pool(database_url, max_connections).await {
            Ok(pool) => {
                tracing::info!(attempt, "Database connection established");
                return pool;
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    error = %e,
                    retry_in_secs = retry_interval.as_secs(),
                    "Unable to connect to the database, retrying",
                );
                tokio::time::sleep(retry_interval).await;
                attempt = attempt.saturating_add(1);
            }
        }
    }
}

/// Round-trip a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
