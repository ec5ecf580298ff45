//! Account lifecycle: registration, credential changes, disable, and
//! soft delete.
//!
//! Mutations that weaken trust in outstanding sessions (password
//! change, disable, soft delete) end with the same revoke-all
//! operation the reuse detector uses. Changing the note-unlock secret
//! does not touch sessions: it is an independent credential and the
//! per-request unlock policy leaves nothing to invalidate.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use notehub_core::config::auth::AuthConfig;
use notehub_core::result::AppResult;
use notehub_database::repositories::revocation::RevocationRepository;
use notehub_database::repositories::user::UserRepository;
use notehub_entity::user::{CreateUser, User};

use crate::password::{CredentialHasher, PasswordValidator};

/// Manages user accounts and their stored credentials.
#[derive(Debug, Clone)]
pub struct AccountManager {
    /// User persistence.
    users: UserRepository,
    /// Mass revocation for credential-weakening mutations.
    revocation: RevocationRepository,
    /// Credential hashing.
    hasher: CredentialHasher,
    /// Password policy.
    validator: PasswordValidator,
}

impl AccountManager {
    /// Creates a new account manager with explicit dependencies.
    pub fn new(
        users: UserRepository,
        revocation: RevocationRepository,
        hasher: CredentialHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            revocation,
            hasher,
            validator,
        }
    }

    /// Convenience constructor wiring all dependencies from a pool and
    /// auth configuration.
    pub fn from_pool(pool: PgPool, config: &AuthConfig) -> Self {
        Self::new(
            UserRepository::new(pool.clone()),
            RevocationRepository::new(pool),
            CredentialHasher::new(),
            PasswordValidator::new(config),
        )
    }

    /// Registers a new user with a password and a note-unlock secret.
    pub async fn register(
        &self,
        name: &str,
        password: &str,
        notes_secret: &str,
    ) -> AppResult<User> {
        self.validator.validate(password)?;
        self.validator.validate_notes_secret(notes_secret)?;

        let user = self
            .users
            .create(&CreateUser {
                name: name.to_string(),
                hashed_password: self.hasher.hash(password)?,
                locked_notes_secret_hash: self.hasher.hash(notes_secret)?,
            })
            .await?;

        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Replaces the account password and revokes every outstanding
    /// session.
    pub async fn change_password(&self, user_id: Uuid, new_password: &str) -> AppResult<()> {
        self.validator.validate(new_password)?;

        let digest = self.hasher.hash(new_password)?;
        self.users.update_password(user_id, &digest).await?;
        self.revocation.revoke_all_for_user(user_id).await?;

        info!(user_id = %user_id, "Password changed; all sessions revoked");
        Ok(())
    }

    /// Replaces the note-unlock secret. Sessions are untouched.
    pub async fn change_notes_secret(&self, user_id: Uuid, new_secret: &str) -> AppResult<()> {
        self.validator.validate_notes_secret(new_secret)?;

        let digest = self.hasher.hash(new_secret)?;
        self.users.update_notes_secret(user_id, &digest).await?;

        info!(user_id = %user_id, "Note-unlock secret changed");
        Ok(())
    }

    /// Disables an account and revokes every outstanding session.
    pub async fn disable(&self, user_id: Uuid) -> AppResult<()> {
        self.users.set_disabled(user_id, true).await?;
        self.revocation.revoke_all_for_user(user_id).await?;

        info!(user_id = %user_id, "Account disabled; all sessions revoked");
        Ok(())
    }

    /// Re-enables a previously disabled account. Revoked sessions stay
    /// revoked; the user logs in again.
    pub async fn enable(&self, user_id: Uuid) -> AppResult<()> {
        self.users.set_disabled(user_id, false).await?;
        info!(user_id = %user_id, "Account enabled");
        Ok(())
    }

    /// Soft-deletes an account and revokes every outstanding session.
    /// The row stays in the store but vanishes from all lookups.
    pub async fn soft_delete(&self, user_id: Uuid) -> AppResult<()> {
        self.users.soft_delete(user_id).await?;
        self.revocation.revoke_all_for_user(user_id).await?;

        info!(user_id = %user_id, "Account soft-deleted; all sessions revoked");
        Ok(())
    }
}
