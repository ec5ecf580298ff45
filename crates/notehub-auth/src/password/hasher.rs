//! Argon2id hashing and verification for passwords, note-unlock
//! secrets, and refresh token digests.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;

/// One-way hashing and verification for every secret the system stores.
///
/// Each credential gets its own digest with its own random salt; the
/// password digest and the note-secret digest of a user are never
/// comparable.
#[derive(Debug, Clone, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    /// Creates a new hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a secret using Argon2id with a fresh random salt.
    pub fn hash(&self, secret: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let digest = argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Credential hashing failed: {e}")))?;

        Ok(digest.to_string())
    }

    /// Verifies a secret against a stored Argon2id digest.
    ///
    /// Fails closed: a malformed digest or any backend error verifies
    /// as `false`, never as `true`. Verification runs in constant time
    /// regardless of where a mismatch occurs.
    pub fn verify(&self, secret: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored credential digest is malformed; treating as mismatch");
                return false;
            }
        };

        match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                warn!(error = %e, "Credential verification backend error; treating as mismatch");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = CredentialHasher::new();
        let digest = hasher.hash("opening-night-jitters").unwrap();

        assert!(digest.starts_with("$argon2"));
        assert!(hasher.verify("opening-night-jitters", &digest));
        assert!(!hasher.verify("opening-night-jitterz", &digest));
    }

    #[test]
    fn test_same_secret_different_digests() {
        let hasher = CredentialHasher::new();
        let a = hasher.hash("repeatable").unwrap();
        let b = hasher.hash("repeatable").unwrap();

        // Random salts make digests unequal even for equal inputs.
        assert_ne!(a, b);
        assert!(hasher.verify("repeatable", &a));
        assert!(hasher.verify("repeatable", &b));
    }

    #[test]
    fn test_malformed_digest_fails_closed() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", ""));
        assert!(!hasher.verify("anything", "$argon2id$v=19$truncated"));
    }

    #[test]
    fn test_digests_of_distinct_credentials_do_not_cross_verify() {
        let hasher = CredentialHasher::new();
        let password_digest = hasher.hash("account-password").unwrap();
        let secret_digest = hasher.hash("note-secret").unwrap();

        assert!(!hasher.verify("note-secret", &password_digest));
        assert!(!hasher.verify("account-password", &secret_digest));
    }
}
