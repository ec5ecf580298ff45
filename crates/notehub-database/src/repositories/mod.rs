//! Concrete repository implementations, one per table, plus the
//! cross-table revocation repository.

pub mod access_token;
pub mod note;
pub mod refresh_token;
pub mod revocation;
pub mod role;
pub mod user;

pub use access_token::AccessTokenRepository;
pub use note::NoteRepository;
pub use refresh_token::RefreshTokenRepository;
pub use revocation::RevocationRepository;
pub use role::RoleRepository;
pub use user::UserRepository;
