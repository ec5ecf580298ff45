//! User repository implementation.
//!
//! Every lookup and mutation here excludes soft-deleted rows; a user
//! with `deleted_at` set is invisible to the authentication and
//! authorization paths.

use sqlx::PgPool;
use uuid::Uuid;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_entity::user::{CreateUser, User};

/// Repository for user CRUD and credential mutations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a non-deleted user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceUnavailable,
                    "Failed to find user by id",
                    e,
                )
            })
    }

    /// Find a non-deleted user by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = $1 AND deleted_at IS NULL")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceUnavailable,
                    "Failed to find user by name",
                    e,
                )
            })
    }

    /// Create a new user. The digests in `data` are already hashed.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, hashed_password, locked_notes_secret_hash) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.hashed_password)
        .bind(&data.locked_notes_secret_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_name_key") => {
                AppError::conflict(format!("User with name '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to create user", e),
        })
    }

    /// Replace a user's password digest.
    pub async fn update_password(&self, user_id: Uuid, hashed_password: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET hashed_password = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .bind(hashed_password)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to update password", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Replace a user's note-unlock secret digest.
    pub async fn update_notes_secret(&self, user_id: Uuid, secret_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET locked_notes_secret_hash = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .bind(secret_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to update notes secret",
                e,
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Set or clear the disabled flag.
    pub async fn set_disabled(&self, user_id: Uuid, disabled: bool) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET disabled = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .bind(disabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to update disabled flag", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }

    /// Soft-delete a user. Idempotence is intentional: a second call
    /// reports not-found because the row is already invisible.
    pub async fn soft_delete(&self, user_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to soft-delete user", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        Ok(())
    }
}
