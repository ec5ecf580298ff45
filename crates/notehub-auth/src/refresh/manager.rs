//! Refresh token lifecycle: opaque secret generation, prefix-indexed
//! lookup, one-shot rotation, and theft detection.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::{debug, warn};
use uuid::Uuid;

use notehub_core::config::auth::AuthConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::repositories::refresh_token::RefreshTokenRepository;
use notehub_database::repositories::revocation::RevocationRepository;

use crate::password::CredentialHasher;

/// Bytes of OS randomness per refresh secret (43 characters once
/// base64-encoded).
const SECRET_BYTES: usize = 32;

/// Length of the non-secret leading slice stored as the database
/// lookup key.
pub const TOKEN_PREFIX_LEN: usize = 24;

/// Uniform public message for every refresh failure; the caller cannot
/// tell an unknown secret from a revoked or expired one.
const GENERIC_REFRESH_MSG: &str = "Invalid refresh token";

/// A freshly issued refresh secret, returned to the client exactly
/// once and never stored in plaintext.
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    /// The opaque secret.
    pub secret: String,
    /// When the secret expires.
    pub expires_at: DateTime<Utc>,
}

/// Manages the refresh token lifecycle.
#[derive(Debug, Clone)]
pub struct RefreshTokenManager {
    /// Refresh token persistence.
    tokens: RefreshTokenRepository,
    /// Mass revocation, triggered on detected reuse.
    revocation: RevocationRepository,
    /// Hasher for token digests.
    hasher: CredentialHasher,
    /// Refresh token TTL in minutes.
    ttl_minutes: i64,
}

impl RefreshTokenManager {
    /// Creates a new manager.
    pub fn new(
        tokens: RefreshTokenRepository,
        revocation: RevocationRepository,
        hasher: CredentialHasher,
        config: &AuthConfig,
    ) -> Self {
        Self {
            tokens,
            revocation,
            hasher,
            ttl_minutes: config.refresh_ttl_minutes as i64,
        }
    }

    /// Issues a new refresh secret for a user and stores its prefix and
    /// digest.
    pub async fn issue(&self, user_id: Uuid) -> AppResult<IssuedRefreshToken> {
        let secret = generate_secret();
        let digest = self.hasher.hash(&secret)?;
        let expires_at = Utc::now() + Duration::minutes(self.ttl_minutes);

        self.tokens
            .create(user_id, token_prefix(&secret), &digest, expires_at)
            .await?;

        debug!(user_id = %user_id, "Issued refresh token");
        Ok(IssuedRefreshToken { secret, expires_at })
    }

    /// Consumes a presented refresh secret, enforcing single use.
    ///
    /// On success the matched token has been atomically claimed
    /// (`revoked` flipped under a `revoked = FALSE` guard) and the
    /// owning user's ID is returned so the caller can mint a
    /// replacement pair. Exactly one of two concurrent presentations of
    /// the same secret can succeed; the loser is handled as reuse.
    ///
    /// A second presentation of an already-rotated secret is treated as
    /// a theft signal: every refresh token and active access token of
    /// that user is revoked before the failure is surfaced.
    pub async fn consume(&self, presented: &str) -> AppResult<Uuid> {
        let candidates = self.tokens.find_by_prefix(token_prefix(presented)).await?;

        // The prefix narrows the search; only the Argon2id comparison
        // decides a match.
        let matched = candidates
            .iter()
            .find(|t| self.hasher.verify(presented, &t.hashed_token));

        let Some(token) = matched else {
            return Err(AppError::invalid_refresh_token(GENERIC_REFRESH_MSG));
        };

        if token.revoked {
            return self.handle_reuse(token.user_id).await;
        }

        if token.is_expired() {
            return Err(AppError::token_expired(GENERIC_REFRESH_MSG));
        }

        if !self.tokens.claim(token.id).await? {
            // Someone else rotated this secret between our read and the
            // conditional update. A legitimate client never races
            // against itself, so the loser is handled as reuse.
            return self.handle_reuse(token.user_id).await;
        }

        Ok(token.user_id)
    }

    /// Revokes whichever stored token matches a presented secret, in
    /// any state. Used on explicit logout; unknown secrets are ignored.
    pub async fn revoke_presented(&self, presented: &str) -> AppResult<()> {
        let candidates = self.tokens.find_by_prefix(token_prefix(presented)).await?;

        if let Some(token) = candidates
            .iter()
            .find(|t| self.hasher.verify(presented, &t.hashed_token))
        {
            self.tokens.revoke(token.id).await?;
        }
        Ok(())
    }

    /// Removes expired and revoked rows (janitor operation).
    pub async fn cleanup(&self) -> AppResult<u64> {
        self.tokens.cleanup_invalid().await
    }

    async fn handle_reuse(&self, user_id: Uuid) -> AppResult<Uuid> {
        warn!(
            user_id = %user_id,
            "Refresh token reuse detected; revoking all tokens for user"
        );
        self.revocation.revoke_all_for_user(user_id).await?;
        Err(AppError::token_reuse_detected(GENERIC_REFRESH_MSG))
    }
}

/// Generates a high-entropy opaque refresh secret.
fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The fixed-length leading slice used as the database lookup key.
///
/// Genuine secrets are ASCII base64; anything that cannot be sliced at
/// the prefix boundary is passed through whole and simply matches no
/// stored prefix.
fn token_prefix(secret: &str) -> &str {
    secret.get(..TOKEN_PREFIX_LEN).unwrap_or(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_shape() {
        let secret = generate_secret();
        // 32 bytes, unpadded URL-safe base64.
        assert_eq!(secret.len(), 43);
        assert!(
            secret
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_secrets_are_unique() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
    }

    #[test]
    fn test_prefix_derivation() {
        let secret = generate_secret();
        let prefix = token_prefix(&secret);
        assert_eq!(prefix.len(), TOKEN_PREFIX_LEN);
        assert!(secret.starts_with(prefix));
    }

    #[test]
    fn test_prefix_of_hostile_input() {
        // Presented secrets come from clients; short or non-ASCII
        // input must not panic.
        assert_eq!(token_prefix("abc"), "abc");
        assert_eq!(token_prefix(""), "");
        let multibyte = "ééééééééééééééééééééééééééééé";
        assert_eq!(token_prefix(multibyte).len(), TOKEN_PREFIX_LEN);
    }
}
