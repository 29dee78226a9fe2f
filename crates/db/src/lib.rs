//! PostgreSQL access for the pdfgen service: pool setup, migrations, row
//! models and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Delay before the second connection attempt in [`connect_with_retry`].
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Multiplier applied to the delay after each failed attempt.
const RETRY_BACKOFF_FACTOR: u32 = 3;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Create a connection pool, retrying with exponential backoff.
///
/// Intended for startup only, where the database may still be coming up.
/// Makes at most `attempts` tries (at least one) and returns the last error.
pub async fn connect_with_retry(database_url: &str, attempts: u32) -> Result<DbPool, sqlx::Error> {
    let attempts = attempts.max(1);
    let mut delay = INITIAL_RETRY_DELAY;
    let mut attempt = 1;

    loop {
        match create_pool(database_url).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    attempts,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %e,
                    "Database connection failed, retrying",
                );
                tokio::time::sleep(delay).await;
                delay *= RETRY_BACKOFF_FACTOR;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
