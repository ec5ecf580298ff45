//! Integration tests for the locked-note secret gate.

mod helpers;

use helpers::TestContext;
use notehub_core::error::ErrorKind;

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_unlock_is_re_verified_every_time() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("dave", "quiet-harbor-morning", "under-the-mat").await;

    // A correct secret verifies every single time it is re-checked.
    assert!(ctx.note_lock.unlock(user.id, "under-the-mat").await.unwrap());
    assert!(ctx.note_lock.unlock(user.id, "under-the-mat").await.unwrap());

    // And a wrong one never does, including right after a correct
    // attempt: no unlocked session lingers.
    assert!(!ctx.note_lock.unlock(user.id, "under-the-rug").await.unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_locked_note_requires_secret() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("dave", "quiet-harbor-morning", "under-the-mat").await;
    let locked = ctx.create_note(user.id, "diary", true).await;
    let open = ctx.create_note(user.id, "groceries", false).await;

    // Unlocked notes pass without a secret.
    ctx.note_lock.require_unlocked(user.id, &open, None).await.unwrap();

    let err = ctx
        .note_lock
        .require_unlocked(user.id, &locked, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SecretMismatch);

    let err = ctx
        .note_lock
        .require_unlocked(user.id, &locked, Some("under-the-rug"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::SecretMismatch);

    ctx.note_lock
        .require_unlocked(user.id, &locked, Some("under-the-mat"))
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_changing_secret_takes_effect() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("dave", "quiet-harbor-morning", "under-the-mat").await;

    ctx.accounts
        .change_notes_secret(user.id, "inside-the-clock")
        .await
        .unwrap();

    assert!(!ctx.note_lock.unlock(user.id, "under-the-mat").await.unwrap());
    assert!(ctx.note_lock.unlock(user.id, "inside-the-clock").await.unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_soft_deleted_notes_vanish_from_lookups() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("dave", "quiet-harbor-morning", "under-the-mat").await;
    let note = ctx.create_note(user.id, "ephemeral", false).await;

    ctx.notes.soft_delete(note.id).await.unwrap();

    assert!(ctx.notes.find_by_id(note.id).await.unwrap().is_none());
    assert!(ctx.notes.list_by_owner(user.id).await.unwrap().is_empty());
}
