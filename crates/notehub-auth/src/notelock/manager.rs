//! The note-unlock secret check.
//!
//! Unlocking is strictly per-request: no unlocked state is persisted
//! or cached anywhere, so every read or write of a locked note's
//! content re-verifies the secret. Changing the secret therefore has
//! nothing to invalidate retroactively.

use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::repositories::user::UserRepository;
use notehub_entity::note::Note;

use crate::password::CredentialHasher;

/// Uniform public message for a failed unlock.
const SECRET_MISMATCH_MSG: &str = "The provided note secret is invalid";

/// Gates access to locked notes behind the owner's note-unlock secret,
/// a credential independent of the login password.
#[derive(Debug, Clone)]
pub struct NoteLockManager {
    /// User lookups for the stored secret digest.
    users: UserRepository,
    /// Digest verification.
    hasher: CredentialHasher,
}

impl NoteLockManager {
    /// Creates a new manager.
    pub fn new(users: UserRepository, hasher: CredentialHasher) -> Self {
        Self { users, hasher }
    }

    /// Verifies a presented secret against the user's stored digest.
    ///
    /// Returns `false` for a missing, soft-deleted, or disabled user as
    /// well as for a mismatch; the decision is never cached, so a wrong
    /// secret stays wrong immediately after a correct attempt.
    pub async fn unlock(&self, user_id: Uuid, presented_secret: &str) -> AppResult<bool> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if !user.can_authenticate() {
            return Ok(false);
        }

        Ok(self
            .hasher
            .verify(presented_secret, &user.locked_notes_secret_hash))
    }

    /// Gate for serving or mutating a note's content.
    ///
    /// Unlocked notes pass untouched. For a locked note, a missing or
    /// mismatched secret yields `SecretMismatch`.
    pub async fn require_unlocked(
        &self,
        user_id: Uuid,
        note: &Note,
        presented_secret: Option<&str>,
    ) -> AppResult<()> {
        if !note.locked {
            return Ok(());
        }

        let Some(secret) = presented_secret else {
            return Err(AppError::secret_mismatch(SECRET_MISMATCH_MSG));
        };

        if self.unlock(user_id, secret).await? {
            Ok(())
        } else {
            Err(AppError::secret_mismatch(SECRET_MISMATCH_MSG))
        }
    }
}
