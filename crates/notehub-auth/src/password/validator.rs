//! Password policy enforcement for new and changed passwords.

use notehub_core::config::auth::AuthConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;

/// Validates password strength against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates an account password.
    ///
    /// Returns `Ok(())` if the password meets the length requirement
    /// and the zxcvbn entropy estimate, or the first violation found.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a longer or less predictable password.",
            ));
        }

        Ok(())
    }

    /// Validates a note-unlock secret.
    ///
    /// The secret is an independent credential with a lighter policy:
    /// only the minimum length applies.
    pub fn validate_notes_secret(&self, secret: &str) -> AppResult<()> {
        if secret.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Note secret must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_rejects_short_passwords() {
        assert!(validator().validate("abc").is_err());
    }

    #[test]
    fn test_rejects_predictable_passwords() {
        assert!(validator().validate("password123").is_err());
    }

    #[test]
    fn test_accepts_strong_passphrases() {
        assert!(validator().validate("marble-otter-votes-9-rivers").is_ok());
    }

    #[test]
    fn test_notes_secret_only_checks_length() {
        assert!(validator().validate_notes_secret("short").is_err());
        // Length is enough; the entropy estimate does not apply.
        assert!(validator().validate_notes_secret("12345678").is_ok());
    }
}
