//! Entity store for the allotment backend.
//!
//! A single SQLite file holds every table. The schema is created by the
//! embedded migrations in `./migrations`, applied at startup by
//! [`run_migrations`]; migrations only ever add, they never rewrite data.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL such as
/// `sqlite://database.sqlite`.
///
/// The database file is created if it does not exist yet. Foreign keys are
/// enforced on every connection.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database answers.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
