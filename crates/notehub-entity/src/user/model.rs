//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// Users are never hard-deleted; `deleted_at` marks a soft delete and
/// excludes the row from every authentication and authorization lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique display name, also the login name.
    pub name: String,
    /// Argon2id digest of the account password.
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Argon2id digest of the note-unlock secret. Independent of the
    /// password digest; the two are never comparable.
    #[serde(skip_serializing)]
    pub locked_notes_secret_hash: String,
    /// Whether an administrator has disabled the account.
    pub disabled: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check whether the user has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check whether the user may authenticate at all.
    ///
    /// A disabled or soft-deleted user authenticates for nothing.
    pub fn can_authenticate(&self) -> bool {
        !self.disabled && !self.is_deleted()
    }
}

/// Data required to create a new user. Both digests are pre-hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired unique name.
    pub name: String,
    /// Argon2id digest of the chosen password.
    pub hashed_password: String,
    /// Argon2id digest of the chosen note-unlock secret.
    pub locked_notes_secret_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(disabled: bool, deleted: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "alice".to_string(),
            hashed_password: "$argon2id$fake".to_string(),
            locked_notes_secret_hash: "$argon2id$fake2".to_string(),
            disabled,
            created_at: now,
            updated_at: now,
            deleted_at: deleted.then(|| now),
        }
    }

    #[test]
    fn test_can_authenticate() {
        assert!(user(false, false).can_authenticate());
        assert!(!user(true, false).can_authenticate());
        assert!(!user(false, true).can_authenticate());
        assert!(!user(true, true).can_authenticate());
    }
}
