pub mod models;
pub mod signups;

pub use models::{NewSignup, SignupDraft, SignupEntry, UserType};
pub use signups::SignupRepository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::error::AppError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a SQLite pool, creating the database file if needed.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<Pool<Sqlite>, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Single-connection in-memory pool with the schema applied. Every
/// connection to `sqlite::memory:` is its own database, so the pool must
/// never open a second one.
#[cfg(test)]
pub(crate) async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
