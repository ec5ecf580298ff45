//! Structural access token validation.
//!
//! This is phase (a) of validation: signature, expiry, issuer, and
//! audience. Phase (b) — the server-side `(user, jti)` revocation check
//! — lives in the session manager, which consults the database.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use notehub_core::config::auth::AuthConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use super::claims::Claims;

/// Validates JWT access token structure and signature.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock-skew tolerance
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        // jti presence is enforced by Claims deserialization itself.
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and structurally validates an access token.
    ///
    /// An expired token surfaces as `TokenExpired`; every other defect
    /// (bad signature, malformed payload, wrong issuer or audience) is
    /// `InvalidCredentials`. Both carry the same public message, so the
    /// caller cannot tell which structural check failed.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::token_expired("Invalid or expired token")
                }
                _ => AppError::invalid_credentials("Invalid or expired token"),
            })?;

        Ok(token_data.claims)
    }
}
