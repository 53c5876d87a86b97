//! User directory read path.
//!
//! Registration, login and profile edits live outside the order engine;
//! the engine only needs to know whether a buyer exists.

use sqlx::SqlitePool;

use bookmall_core::UserId;

use super::RepositoryError;

/// Repository for buyer existence checks.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether a buyer with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, user_id: UserId) -> Result<bool, RepositoryError> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM user WHERE id = ?1)")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(found == 1)
    }
}
