//! Note repository implementation.
//!
//! Lookups exclude soft-deleted rows. Whether a locked note's content
//! may be served is decided by the caller (the note lock manager); the
//! repository itself is policy-free.

use sqlx::PgPool;
use uuid::Uuid;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_entity::note::{CreateNote, Note, UpdateNote};

/// Repository for note CRUD operations.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Create a new note repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new note.
    pub async fn create(&self, data: &CreateNote) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "INSERT INTO notes (owner_id, title, content, locked) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.locked)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to create note", e)
        })
    }

    /// Find a non-deleted note by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Note>> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to find note", e)
            })
    }

    /// List a user's non-deleted notes, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to list notes", e)
        })
    }

    /// Update a note's fields. `None` fields are left unchanged.
    pub async fn update(&self, note_id: Uuid, data: &UpdateNote) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "UPDATE notes SET title = COALESCE($2, title), \
                              content = COALESCE($3, content), \
                              locked = COALESCE($4, locked), \
                              updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(note_id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.locked)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to update note", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Note {note_id} not found")))
    }

    /// Soft-delete a note.
    pub async fn soft_delete(&self, note_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE notes SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(note_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to soft-delete note", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Note {note_id} not found")));
        }
        Ok(())
    }
}
