//! Unified application error types for NoteHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A name/password pair or an access token failed verification.
    InvalidCredentials,
    /// The account exists but has been disabled by an administrator.
    AccountDisabled,
    /// A token (access or refresh) is past its expiry.
    TokenExpired,
    /// An access token's server-side record has been removed.
    TokenRevoked,
    /// A presented refresh secret matched no stored token.
    InvalidRefreshToken,
    /// An already-rotated refresh token was presented again.
    TokenReuseDetected,
    /// The caller holds none of the roles an operation requires.
    InsufficientRole,
    /// The note-unlock secret did not match.
    SecretMismatch,
    /// The requested resource was not found.
    NotFound,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// Input validation failed.
    Validation,
    /// A configuration error occurred.
    Configuration,
    /// The relational store could not be reached or a query failed.
    PersistenceUnavailable,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::AccountDisabled => write!(f, "ACCOUNT_DISABLED"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::TokenRevoked => write!(f, "TOKEN_REVOKED"),
            Self::InvalidRefreshToken => write!(f, "INVALID_REFRESH_TOKEN"),
            Self::TokenReuseDetected => write!(f, "TOKEN_REUSE_DETECTED"),
            Self::InsufficientRole => write!(f, "INSUFFICIENT_ROLE"),
            Self::SecretMismatch => write!(f, "SECRET_MISMATCH"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::PersistenceUnavailable => write!(f, "PERSISTENCE_UNAVAILABLE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout NoteHub.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls, giving the application boundary a
/// single error type.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create an account-disabled error.
    pub fn account_disabled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountDisabled, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenExpired, message)
    }

    /// Create a token-revoked error.
    pub fn token_revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenRevoked, message)
    }

    /// Create an invalid-refresh-token error.
    pub fn invalid_refresh_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRefreshToken, message)
    }

    /// Create a token-reuse error.
    pub fn token_reuse_detected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenReuseDetected, message)
    }

    /// Create an insufficient-role error.
    pub fn insufficient_role(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientRole, message)
    }

    /// Create a secret-mismatch error.
    pub fn secret_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SecretMismatch, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error belongs to the authentication failure class.
    ///
    /// The request layer surfaces every kind in this class as one
    /// generic "unauthorized" outcome so a caller cannot tell which
    /// factor failed.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidCredentials
                | ErrorKind::AccountDisabled
                | ErrorKind::TokenExpired
                | ErrorKind::TokenRevoked
                | ErrorKind::InvalidRefreshToken
                | ErrorKind::TokenReuseDetected
        )
    }

    /// Whether this error belongs to the authorization failure class,
    /// surfaced as "forbidden" and distinct from authentication.
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InsufficientRole | ErrorKind::SecretMismatch
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_class_is_unauthorized() {
        for kind in [
            ErrorKind::InvalidCredentials,
            ErrorKind::AccountDisabled,
            ErrorKind::TokenExpired,
            ErrorKind::TokenRevoked,
            ErrorKind::InvalidRefreshToken,
            ErrorKind::TokenReuseDetected,
        ] {
            let err = AppError::new(kind, "denied");
            assert!(err.is_unauthorized(), "{kind} should be unauthorized");
            assert!(!err.is_forbidden());
        }
    }

    #[test]
    fn test_authorization_class_is_forbidden() {
        assert!(AppError::insufficient_role("nope").is_forbidden());
        assert!(AppError::secret_mismatch("nope").is_forbidden());
        assert!(!AppError::insufficient_role("nope").is_unauthorized());
    }

    #[test]
    fn test_persistence_errors_are_neither() {
        let err = AppError::new(ErrorKind::PersistenceUnavailable, "db down");
        assert!(!err.is_unauthorized());
        assert!(!err.is_forbidden());
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::token_expired("Token has expired");
        assert_eq!(err.to_string(), "TOKEN_EXPIRED: Token has expired");
    }
}
