//! Database access layer for user persistence.
//!
//! The repository translates between the domain model and the `users` table.
//! All SQL lives under this module; the service and HTTP layers only see
//! typed operations.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

pub mod users;

use crate::error::Result;

/// Schema for the single `users` table.
const USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id    TEXT NOT NULL PRIMARY KEY,
        email TEXT NOT NULL,
        name  TEXT NOT NULL,
        blog  TEXT
    )
";

/// Creates the `users` table if it does not exist.
///
/// There is no migration versioning; the statement is idempotent and runs
/// once at startup.
///
/// # Errors
///
/// Returns `CoreError::Database` if the statement fails.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(USERS_TABLE).execute(pool).await?;
    debug!("users table ready");
    Ok(())
}

/// Entry point for all database operations.
///
/// Owns the shared connection pool. Cloning is cheap and every clone talks to
/// the same pool.
#[derive(Clone)]
pub struct Storage {
    /// Repository for user records.
    pub users: Arc<users::Repository>,
}

impl Storage {
    /// Creates a new storage instance with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        let pool = Arc::new(pool);

        Self { users: Arc::new(users::Repository::new(pool)) }
    }

    /// Performs a health check on the database connection.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Database` if the connection is unhealthy.
    pub async fn health_check(&self) -> Result<()> {
        let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&*self.users.pool()).await?;

        Ok(())
    }
}
