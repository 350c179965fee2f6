//! Persistence layer: pool construction, the patch builder, storage error
//! translation, models, and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod patch;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Upper bound on simultaneously open connections.
pub const MAX_CONNECTIONS: u32 = 25;

/// Idle connections are closed after this long.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Connections are recycled after this long regardless of use.
pub const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// How long a caller waits for a free connection (also bounds the initial
/// connect).
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
