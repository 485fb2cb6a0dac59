//! Connection pool and table bootstrap for the SQLite store.

use crate::entity;
use crate::error::AppError;
use crate::sql::create_table;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open a pool on `database_url`, creating the database file if it does not exist.
/// Foreign keys are declared but not enforced: deleting a director or genre leaves
/// movies pointing at it.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the director, genre and movie tables (and foreign-key indexes) if they do not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for def in entity::ALL {
        for stmt in create_table(def) {
            tracing::debug!(sql = %stmt, "ddl");
            sqlx::query(&stmt).execute(pool).await?;
        }
    }
    Ok(())
}

/// Cheap round-trip used by the readiness probe.
pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}
