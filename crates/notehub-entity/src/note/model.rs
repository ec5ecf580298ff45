//! Note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A note owned by exactly one user.
///
/// A locked note's content may only be served or mutated after the
/// owner's note-unlock secret has been re-verified for that request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    /// Unique note identifier.
    pub id: Uuid,
    /// The owning user; notes are cascade-deleted with their owner.
    pub owner_id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Whether the note is gated behind the note-unlock secret.
    pub locked: bool,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Check whether the note has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    /// The owning user.
    pub owner_id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body.
    pub content: String,
    /// Whether to gate the note behind the unlock secret.
    pub locked: bool,
}

/// Data for updating an existing note. `None` fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNote {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// New locked flag.
    pub locked: Option<bool>,
}
