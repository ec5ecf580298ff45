//! Active access token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The server-side record of an issued access token.
///
/// Row presence for `(user_id, jti)` with an unexpired `expires_at` is
/// what keeps a structurally valid JWT accepted; deleting the row
/// revokes the token before its embedded expiry. A row lingering past
/// its expiry grants nothing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActiveAccessToken {
    /// Unique row identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// The token identifier embedded in the JWT.
    pub jti: Uuid,
    /// Expiry mirrored from the JWT claims.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl ActiveAccessToken {
    /// Check whether this record is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Seconds until expiry (zero if already expired).
    pub fn expires_in_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}
