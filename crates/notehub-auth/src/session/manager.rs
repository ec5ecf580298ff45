//! Session lifecycle manager — login, refresh, validation, and logout
//! flows.
//!
//! Every authentication failure leaving this module carries the same
//! public message within its flow, so a caller cannot distinguish a
//! wrong password from a disabled account, or a revoked token from an
//! expired one. The precise [`ErrorKind`](notehub_core::ErrorKind)
//! remains available to the request layer for logging and for the
//! single unauthorized/forbidden split.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use chrono::{DateTime, Utc};

use notehub_core::config::auth::AuthConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::repositories::access_token::AccessTokenRepository;
use notehub_database::repositories::refresh_token::RefreshTokenRepository;
use notehub_database::repositories::revocation::RevocationRepository;
use notehub_database::repositories::role::RoleRepository;
use notehub_database::repositories::user::UserRepository;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::CredentialHasher;
use crate::refresh::RefreshTokenManager;

/// Uniform public message for every login failure.
const GENERIC_LOGIN_MSG: &str = "Invalid name or password";

/// Uniform public message for every access token failure.
const GENERIC_TOKEN_MSG: &str = "Invalid or expired token";

/// The token pair handed to a client on login or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived signed access token.
    pub access_token: String,
    /// Long-lived opaque refresh secret, single-use.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// The identity extracted from a fully validated access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The user ID.
    pub id: Uuid,
    /// Role slugs embedded at issuance time. Authorization decisions
    /// re-resolve roles from the store; this set is informational.
    pub roles: HashSet<String>,
}

/// Orchestrates the complete session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// User lookups.
    users: UserRepository,
    /// Role slug resolution for token claims.
    roles: RoleRepository,
    /// Server-side access token records.
    access_tokens: AccessTokenRepository,
    /// Mass revocation.
    revocation: RevocationRepository,
    /// Refresh token lifecycle.
    refresh_tokens: RefreshTokenManager,
    /// Password verification.
    hasher: CredentialHasher,
    /// Access token signing.
    encoder: JwtEncoder,
    /// Access token structural validation.
    decoder: JwtDecoder,
}

impl SessionManager {
    /// Creates a new session manager with explicit dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: UserRepository,
        roles: RoleRepository,
        access_tokens: AccessTokenRepository,
        revocation: RevocationRepository,
        refresh_tokens: RefreshTokenManager,
        hasher: CredentialHasher,
        encoder: JwtEncoder,
        decoder: JwtDecoder,
    ) -> Self {
        Self {
            users,
            roles,
            access_tokens,
            revocation,
            refresh_tokens,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Convenience constructor wiring all dependencies from a pool and
    /// auth configuration.
    pub fn from_pool(pool: PgPool, config: &AuthConfig) -> Self {
        let hasher = CredentialHasher::new();
        let refresh_tokens = RefreshTokenManager::new(
            RefreshTokenRepository::new(pool.clone()),
            RevocationRepository::new(pool.clone()),
            hasher.clone(),
            config,
        );

        Self::new(
            UserRepository::new(pool.clone()),
            RoleRepository::new(pool.clone()),
            AccessTokenRepository::new(pool.clone()),
            RevocationRepository::new(pool),
            refresh_tokens,
            hasher,
            JwtEncoder::new(config),
            JwtDecoder::new(config),
        )
    }

    /// Performs the login flow:
    ///
    /// 1. Fetch the non-deleted user by name
    /// 2. Verify the password
    /// 3. Reject disabled accounts
    /// 4. Issue an access + refresh pair
    ///
    /// All three failure modes surface identically.
    pub async fn login(&self, name: &str, password: &str) -> AppResult<TokenPair> {
        let Some(user) = self.users.find_by_name(name).await? else {
            return Err(AppError::invalid_credentials(GENERIC_LOGIN_MSG));
        };

        if !self.hasher.verify(password, &user.hashed_password) {
            return Err(AppError::invalid_credentials(GENERIC_LOGIN_MSG));
        }

        if user.disabled {
            return Err(AppError::account_disabled(GENERIC_LOGIN_MSG));
        }

        let pair = self.issue_pair(user.id).await?;
        info!(user_id = %user.id, "Login successful");
        Ok(pair)
    }

    /// Rotates a presented refresh secret into a fresh token pair.
    ///
    /// Single-use enforcement, reuse detection, and the concurrent-
    /// presentation race live in [`RefreshTokenManager::consume`]; this
    /// method re-checks the owning user before minting replacements.
    pub async fn refresh(&self, refresh_secret: &str) -> AppResult<TokenPair> {
        let user_id = self.refresh_tokens.consume(refresh_secret).await?;

        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Err(AppError::invalid_refresh_token("Invalid refresh token"));
        };
        if user.disabled {
            return Err(AppError::account_disabled("Invalid refresh token"));
        }

        let pair = self.issue_pair(user.id).await?;
        info!(user_id = %user.id, "Refresh token rotated");
        Ok(pair)
    }

    /// Validates an access token in two phases and resolves the
    /// authenticated identity.
    ///
    /// Phase (a): signature, expiry, issuer, audience. Phase (b): the
    /// `(user, jti)` record must still exist with an unexpired stored
    /// expiry — this is what lets logout, password change, and admin
    /// disable take effect before the token's own expiry. Finally the
    /// user must still be present and enabled.
    pub async fn validate_access(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let claims = self.decoder.decode(token)?;

        let record = self
            .access_tokens
            .find(claims.sub, claims.jti)
            .await?
            .ok_or_else(|| AppError::token_revoked(GENERIC_TOKEN_MSG))?;

        // A lingering row past its stored expiry grants nothing.
        if record.is_expired() {
            return Err(AppError::token_expired(GENERIC_TOKEN_MSG));
        }

        let Some(user) = self.users.find_by_id(claims.sub).await? else {
            return Err(AppError::invalid_credentials(GENERIC_TOKEN_MSG));
        };
        if user.disabled {
            return Err(AppError::account_disabled(GENERIC_TOKEN_MSG));
        }

        Ok(AuthenticatedUser {
            id: user.id,
            roles: claims.roles.into_iter().collect(),
        })
    }

    /// Logs out a single session: removes the access token's record
    /// and revokes the accompanying refresh secret if one is presented,
    /// whatever state it is in.
    pub async fn logout(&self, claims: &Claims, refresh_secret: Option<&str>) -> AppResult<()> {
        self.access_tokens.delete(claims.sub, claims.jti).await?;

        if let Some(secret) = refresh_secret {
            self.refresh_tokens.revoke_presented(secret).await?;
        }

        info!(user_id = %claims.sub, jti = %claims.jti, "Session logged out");
        Ok(())
    }

    /// Revokes every session of a user: all refresh tokens revoked and
    /// all access token records deleted, atomically.
    pub async fn logout_all(&self, user_id: Uuid) -> AppResult<()> {
        self.revocation.revoke_all_for_user(user_id).await?;
        Ok(())
    }

    /// Removes expired token bookkeeping rows (janitor operation).
    pub async fn cleanup_expired_tokens(&self) -> AppResult<(u64, u64)> {
        let refresh = self.refresh_tokens.cleanup().await?;
        let access = self.access_tokens.cleanup_expired().await?;
        Ok((refresh, access))
    }

    async fn issue_pair(&self, user_id: Uuid) -> AppResult<TokenPair> {
        let roles = self.roles.slugs_for_user(user_id).await?;

        let (access_token, claims) = self.encoder.issue(user_id, roles)?;
        self.access_tokens
            .insert(user_id, claims.jti, claims.expires_at())
            .await?;

        let refresh = self.refresh_tokens.issue(user_id).await?;

        Ok(TokenPair {
            access_token,
            refresh_token: refresh.secret,
            access_expires_at: claims.expires_at(),
            refresh_expires_at: refresh.expires_at,
        })
    }
}
