//! Convenience result type alias for NoteHub.

use crate::error::AppError;

/// A specialized `Result` type for NoteHub operations, so that crates
/// do not need to spell out `Result<T, AppError>` everywhere.
pub type AppResult<T> = Result<T, AppError>;
