//! Refresh token repository implementation.
//!
//! The claim operation is the workspace's one mandatory atomic
//! conditional update: two concurrent presentations of the same secret
//! must never both rotate. The `WHERE revoked = FALSE` guard decides
//! the race at the database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_entity::token::RefreshToken;

/// Repository for refresh token storage, candidate lookup, and the
/// single-use claim.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a freshly issued token. The secret itself never reaches
    /// this layer; only its prefix and digest do.
    pub async fn create(
        &self,
        user_id: Uuid,
        token_prefix: &str,
        hashed_token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<RefreshToken> {
        sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (user_id, token_prefix, hashed_token, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(user_id)
        .bind(token_prefix)
        .bind(hashed_token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to store refresh token",
                e,
            )
        })
    }

    /// Fetch every token whose prefix matches, in any state.
    ///
    /// Prefixes are not collision-free, so this is a candidate set, not
    /// a unique lookup. Revoked and expired rows are included on
    /// purpose: the rotation logic must distinguish reuse and expiry
    /// from an unknown secret.
    pub async fn find_by_prefix(&self, token_prefix: &str) -> AppResult<Vec<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE token_prefix = $1",
        )
        .bind(token_prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to find refresh tokens by prefix",
                e,
            )
        })
    }

    /// Atomically claim a token for rotation.
    ///
    /// Returns `true` only for the caller whose update flipped
    /// `revoked` from `FALSE` to `TRUE`; every other concurrent caller
    /// observes zero affected rows.
    pub async fn claim(&self, token_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1 AND revoked = FALSE",
        )
        .bind(token_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to claim refresh token",
                e,
            )
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// Revoke a token unconditionally (explicit logout path).
    pub async fn revoke(&self, token_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = $1")
            .bind(token_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceUnavailable,
                    "Failed to revoke refresh token",
                    e,
                )
            })?;
        Ok(())
    }

    /// Delete expired and revoked tokens (janitor operation).
    pub async fn cleanup_invalid(&self) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW() OR revoked = TRUE")
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::PersistenceUnavailable,
                        "Failed to cleanup refresh tokens",
                        e,
                    )
                })?;
        Ok(result.rows_affected())
    }
}
