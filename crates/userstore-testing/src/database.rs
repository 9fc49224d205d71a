//! Database management for deterministic testing.
//!
//! Each `TestDatabase` is a private in-memory SQLite database. The pool is
//! capped at one connection that never expires, so the database lives
//! exactly as long as the handle.

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::debug;

/// Isolated in-memory test database with the schema applied.
#[derive(Debug)]
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Creates a fresh database and runs the schema setup.
    pub async fn new() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("failed to open in-memory database")?;

        userstore_core::storage::migrate(&pool).await.context("failed to create schema")?;
        debug!("test database ready");

        Ok(Self { pool })
    }

    /// Access to the underlying database pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
