//! # notehub-auth
//!
//! Credential and session lifecycle management for NoteHub: password
//! and note-secret hashing, JWT access token issuance and validation
//! with server-side revocation, single-use rotating refresh tokens
//! with reuse detection, flat RBAC, and the locked-note secret gate.
//!
//! ## Modules
//!
//! - `password` — Argon2id hashing and password policy enforcement
//! - `jwt` — access token creation and structural validation
//! - `refresh` — refresh token issuance, rotation, and reuse detection
//! - `rbac` — role-based access control decisions
//! - `notelock` — secondary-secret gate for locked notes
//! - `session` — the login/refresh/validate/logout façade
//! - `account` — registration and account credential mutations

pub mod account;
pub mod jwt;
pub mod notelock;
pub mod password;
pub mod rbac;
pub mod refresh;
pub mod session;

pub use account::AccountManager;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use notelock::NoteLockManager;
pub use password::{CredentialHasher, PasswordValidator};
pub use rbac::RbacEngine;
pub use refresh::RefreshTokenManager;
pub use session::{AuthenticatedUser, SessionManager, TokenPair};
