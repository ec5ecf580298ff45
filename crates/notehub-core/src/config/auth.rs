//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Issuer claim embedded in and required of every access token.
    #[serde(default = "default_jwt_party")]
    pub jwt_issuer: String,
    /// Audience claim embedded in and required of every access token.
    #[serde(default = "default_jwt_party")]
    pub jwt_audience: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in minutes.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_minutes: u64,
    /// Minimum length for passwords and note-unlock secrets.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_jwt_party(),
            jwt_audience: default_jwt_party(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_minutes: default_refresh_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_jwt_party() -> String {
    "notehub".to_string()
}

fn default_access_ttl() -> u64 {
    5
}

fn default_refresh_ttl() -> u64 {
    60
}

fn default_password_min() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_ttl_minutes, 5);
        assert_eq!(config.refresh_ttl_minutes, 60);
        assert_eq!(config.password_min_length, 8);
        assert_eq!(config.jwt_issuer, "notehub");
        assert_eq!(config.jwt_audience, "notehub");
    }
}
