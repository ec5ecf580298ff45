//! Active access token repository implementation.
//!
//! Rows here are an allow-list: a structurally valid JWT is honored
//! only while its `(user_id, jti)` row exists with an unexpired
//! `expires_at`. Deleting rows is how logout and admin revocation take
//! effect before the token's own expiry.

use sqlx::PgPool;
use uuid::Uuid;

use chrono::{DateTime, Utc};

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_entity::token::ActiveAccessToken;

/// Repository for the server-side access token records.
#[derive(Debug, Clone)]
pub struct AccessTokenRepository {
    pool: PgPool,
}

impl AccessTokenRepository {
    /// Create a new access token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an issued token.
    ///
    /// `(user_id, jti)` is unique; with random jtis a collision is
    /// negligible, so it is silently ignored.
    pub async fn insert(
        &self,
        user_id: Uuid,
        jti: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO active_access_tokens (user_id, jti, expires_at) \
             VALUES ($1, $2, $3) ON CONFLICT (user_id, jti) DO NOTHING",
        )
        .bind(user_id)
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to record access token",
                e,
            )
        })?;
        Ok(())
    }

    /// Find the record for `(user_id, jti)`, expired or not.
    ///
    /// The caller compares `expires_at` itself; a lingering expired row
    /// must never be mistaken for a live one.
    pub async fn find(&self, user_id: Uuid, jti: Uuid) -> AppResult<Option<ActiveAccessToken>> {
        sqlx::query_as::<_, ActiveAccessToken>(
            "SELECT * FROM active_access_tokens WHERE user_id = $1 AND jti = $2",
        )
        .bind(user_id)
        .bind(jti)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to find access token record",
                e,
            )
        })
    }

    /// Delete the record for `(user_id, jti)` (single-token logout).
    pub async fn delete(&self, user_id: Uuid, jti: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM active_access_tokens WHERE user_id = $1 AND jti = $2")
                .bind(user_id)
                .bind(jti)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::PersistenceUnavailable,
                        "Failed to delete access token record",
                        e,
                    )
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete expired records (janitor operation).
    pub async fn cleanup_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM active_access_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceUnavailable,
                    "Failed to cleanup access tokens",
                    e,
                )
            })?;
        Ok(result.rows_affected())
    }
}
