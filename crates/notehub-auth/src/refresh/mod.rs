//! Refresh token issuance, rotation, and reuse detection.

pub mod manager;

pub use manager::{IssuedRefreshToken, RefreshTokenManager, TOKEN_PREFIX_LEN};
