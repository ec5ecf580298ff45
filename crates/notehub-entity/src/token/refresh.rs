//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored refresh token.
///
/// The full secret is never persisted: only its Argon2id digest and a
/// short leading slice (`token_prefix`) used as a non-secret database
/// lookup key. A token is revoked exactly once, when it is consumed by
/// rotation or invalidated; rows are deleted only by owner cascade or
/// expiry cleanup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique token identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Fixed-length leading slice of the secret. Indexable and
    /// non-secret; not guaranteed collision-free.
    pub token_prefix: String,
    /// Argon2id digest of the full secret.
    #[serde(skip_serializing)]
    pub hashed_token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// Whether the token has been consumed or invalidated.
    pub revoked: bool,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Check whether this token is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_in: Duration) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_prefix: "abcdefghijklmnopqrstuvwx".to_string(),
            hashed_token: "$argon2id$fake".to_string(),
            expires_at: now + expires_in,
            revoked: false,
            created_at: now,
        }
    }

    #[test]
    fn test_expiry() {
        assert!(!token(Duration::minutes(60)).is_expired());
        assert!(token(Duration::seconds(-1)).is_expired());
    }
}
