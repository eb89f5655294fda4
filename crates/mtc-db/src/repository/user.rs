//! # User Repository
//!
//! Back-office accounts used by the login endpoint.
//!
//! Passwords are stored as Argon2 PHC strings; see [`crate::password`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::password;
use mtc_core::{User, UserRole};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by username (exact match).
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, full_name, is_active, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Creates a user, hashing the plain password.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Username is taken
    pub async fn create(
        &self,
        username: &str,
        plain_password: &str,
        role: UserRole,
        full_name: Option<&str>,
    ) -> DbResult<User> {
        debug!(username = %username, role = role.as_str(), "Creating user");

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password::hash_password(plain_password)?,
            role,
            full_name: full_name.map(str::to_string),
            is_active: true,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role, full_name, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.full_name)
        .bind(user.is_active)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            err if err.is_unique_violation_on("users.username") => {
                DbError::duplicate("username", username)
            }
            err => err,
        })?;

        Ok(user)
    }

    /// Enables or disables a user.
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET is_active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
