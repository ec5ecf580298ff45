//! # notehub-entity
//!
//! Domain entity models for NoteHub. Every struct in this crate
//! represents a database table row or a create/update payload. All
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! table rows additionally derive `sqlx::FromRow`.

pub mod note;
pub mod role;
pub mod token;
pub mod user;

pub use note::Note;
pub use role::{Role, UserRoleAssignment};
pub use token::{ActiveAccessToken, RefreshToken};
pub use user::User;
