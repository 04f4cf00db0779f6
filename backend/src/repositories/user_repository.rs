//! Database repository for user management operations.
//!
//! Provides CRUD operations for user records. All queries go through the
//! runtime-checked `sqlx::query_as` API against the `users` table.

use crate::database::models::{CreateUser, UpdateUser, User};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = r#"
    id, name, email, phone_number, password_hash, profile_img, is_admin, created_at, updated_at
"#;

/// Repository for user database operations.
///
/// Handles all persistence operations for the User entity.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Arguments
    /// * `user` - CreateUser DTO containing user details
    ///
    /// # Returns
    /// The newly created User with all fields populated
    ///
    /// # Errors
    /// Fails with the underlying `sqlx::Error` when the email or phone number
    /// violates its UNIQUE constraint.
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO users (id, name, email, phone_number, password_hash, profile_img, is_admin, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(user.name)
            .bind(user.email)
            .bind(user.phone_number)
            .bind(user.password_hash)
            .bind(user.profile_img)
            .bind(user.is_admin)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves a user by their phone number.
    pub async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE phone_number = ?");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(phone_number)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Checks if an email already exists in the system.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Checks if a phone number already exists in the system.
    pub async fn phone_number_exists(&self, phone_number: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE phone_number = ?")
            .bind(phone_number)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Retrieves every non-admin user, newest first.
    pub async fn get_non_admin_users(&self) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_admin = 0 ORDER BY created_at DESC, id DESC"
        );
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Applies a partial profile update.
    ///
    /// # Arguments
    /// * `id` - User ID
    /// * `changes` - Columns to change; `None` fields keep their stored value
    /// * `non_admin_only` - Restrict the update to rows with `is_admin = 0`
    ///
    /// # Returns
    /// The updated User, or `None` when no row matched
    pub async fn update_user(
        &self,
        id: &str,
        changes: UpdateUser,
        non_admin_only: bool,
    ) -> Result<Option<User>> {
        let query = format!(
            r#"
            UPDATE users
            SET name = COALESCE(?, name),
                profile_img = COALESCE(?, profile_img),
                updated_at = ?
            WHERE id = ? AND (? = 0 OR is_admin = 0)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(changes.name)
            .bind(changes.profile_img)
            .bind(Utc::now())
            .bind(id)
            .bind(non_admin_only)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Permanently removes a user.
    ///
    /// # Returns
    /// The removed row, or `None` when the user was already gone
    pub async fn delete_user(&self, id: &str) -> Result<Option<User>> {
        let query = format!("DELETE FROM users WHERE id = ? RETURNING {USER_COLUMNS}");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Permanently removes a non-admin user; admin rows are left in place.
    pub async fn delete_non_admin_user(&self, id: &str) -> Result<Option<User>> {
        let query =
            format!("DELETE FROM users WHERE id = ? AND is_admin = 0 RETURNING {USER_COLUMNS}");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Get total count of users
    pub async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
