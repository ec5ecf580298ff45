//! Cross-table mass revocation.
//!
//! "Revoke everything for this user" must be all-or-nothing: a refresh
//! token or access token record surviving a declared revoke-all is a
//! correctness violation, not a cosmetic one. Both statements therefore
//! run inside a single transaction.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;

/// Repository for the single idempotent revoke-all-for-user operation,
/// shared by explicit logout-all, reuse detection, password change,
/// account disable, and soft delete.
#[derive(Debug, Clone)]
pub struct RevocationRepository {
    pool: PgPool,
}

impl RevocationRepository {
    /// Create a new revocation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Revoke every refresh token and delete every active access token
    /// record belonging to a user, atomically.
    ///
    /// Returns `(refresh_tokens_revoked, access_tokens_deleted)`.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<(u64, u64)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to begin revocation transaction",
                e,
            )
        })?;

        let refresh = sqlx::query(
            "UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to revoke refresh tokens",
                e,
            )
        })?;

        let access = sqlx::query("DELETE FROM active_access_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceUnavailable,
                    "Failed to delete access token records",
                    e,
                )
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to commit revocation transaction",
                e,
            )
        })?;

        info!(
            user_id = %user_id,
            refresh_revoked = refresh.rows_affected(),
            access_deleted = access.rows_affected(),
            "Revoked all tokens for user"
        );

        Ok((refresh.rows_affected(), access.rows_affected()))
    }
}
