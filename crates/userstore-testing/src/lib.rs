//! Test infrastructure for the userstore service.
//!
//! Provides an isolated in-memory database per test, fixture builders for
//! user payloads, and helpers for driving the router with raw requests.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use anyhow::Result;
use sqlx::SqlitePool;
use userstore_core::{Storage, UserService};

pub mod database;
pub mod fixtures;
pub mod http;

pub use database::TestDatabase;
pub use fixtures::UserBuilder;

/// Test environment with its own database.
///
/// Every `TestEnv` owns a fresh in-memory SQLite database with the schema
/// applied, so tests never observe each other's rows.
pub struct TestEnv {
    database: TestDatabase,
    storage: Storage,
}

impl TestEnv {
    /// Creates a new environment with an empty `users` table.
    pub async fn new() -> Result<Self> {
        let database = TestDatabase::new().await?;
        let storage = Storage::new(database.pool().clone());

        Ok(Self { database, storage })
    }

    /// Access to the underlying database pool.
    pub fn pool(&self) -> &SqlitePool {
        self.database.pool()
    }

    /// Storage layer backed by this environment's database.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// A user service over this environment's storage.
    pub fn user_service(&self) -> UserService {
        UserService::new(self.storage.clone())
    }

    /// Number of rows in the `users` table.
    pub async fn user_count(&self) -> Result<i64> {
        Ok(self.storage.users.count().await?)
    }

    /// Drops the `users` table to simulate a broken store.
    pub async fn break_storage(&self) -> Result<()> {
        sqlx::query("DROP TABLE users").execute(self.pool()).await?;
        Ok(())
    }
}
