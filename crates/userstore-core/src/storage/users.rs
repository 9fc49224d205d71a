//! Repository for user database operations.
//!
//! Each operation is a single parameterized statement. Uniqueness of the
//! primary key is left to the database; a duplicate insert surfaces as
//! `CoreError::ConstraintViolation`.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    error::Result,
    models::{User, UserId},
};

/// Repository for user database operations.
pub struct Repository {
    pool: Arc<SqlitePool>,
}

impl Repository {
    /// Creates a new repository instance.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<SqlitePool> {
        self.pool.clone()
    }

    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConstraintViolation` if the id is taken, or
    /// `CoreError::Database` if the statement fails.
    pub async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, email, blog)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.blog)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns error if query fails.
    pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, name, email, blog
            FROM users
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(user)
    }

    /// Counts stored users.
    ///
    /// # Errors
    ///
    /// Returns error if query fails.
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(&*self.pool).await?;

        Ok(count)
    }
}
