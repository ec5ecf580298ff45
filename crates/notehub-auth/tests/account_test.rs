//! Integration tests for registration and account mutations.

mod helpers;

use helpers::TestContext;
use notehub_core::error::ErrorKind;

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_register_then_login() {
    let ctx = TestContext::new().await;

    let user = ctx
        .accounts
        .register("erin", "marble-otter-votes-9-rivers", "behind-the-painting")
        .await
        .unwrap();
    assert_eq!(user.name, "erin");

    ctx.sessions
        .login("erin", "marble-otter-votes-9-rivers")
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_duplicate_name_is_a_conflict() {
    let ctx = TestContext::new().await;
    ctx.accounts
        .register("erin", "marble-otter-votes-9-rivers", "behind-the-painting")
        .await
        .unwrap();

    let err = ctx
        .accounts
        .register("erin", "granite-spoon-sings-4-ways", "different-secret")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_weak_password_rejected_before_any_write() {
    let ctx = TestContext::new().await;

    let err = ctx
        .accounts
        .register("erin", "password123", "behind-the-painting")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    assert!(ctx.users.find_by_name("erin").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_password_change_revokes_all_sessions() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("erin", "quilted-morning-light-8", "behind-the-painting").await;

    let pair = ctx.sessions.login("erin", "quilted-morning-light-8").await.unwrap();

    ctx.accounts
        .change_password(user.id, "marble-otter-votes-9-rivers")
        .await
        .unwrap();

    // Old sessions die with the old password.
    assert!(ctx.sessions.validate_access(&pair.access_token).await.is_err());
    assert!(ctx.sessions.refresh(&pair.refresh_token).await.is_err());

    // The new password logs in normally.
    ctx.sessions
        .login("erin", "marble-otter-votes-9-rivers")
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_soft_delete_removes_user_from_all_lookups() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("erin", "quilted-morning-light-8", "behind-the-painting").await;
    let pair = ctx.sessions.login("erin", "quilted-morning-light-8").await.unwrap();

    ctx.accounts.soft_delete(user.id).await.unwrap();

    assert!(ctx.users.find_by_id(user.id).await.unwrap().is_none());
    assert!(ctx.users.find_by_name("erin").await.unwrap().is_none());
    assert!(ctx.sessions.login("erin", "quilted-morning-light-8").await.is_err());
    assert!(ctx.sessions.validate_access(&pair.access_token).await.is_err());
}

#[tokio::test]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_reenabled_account_logs_in_again() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("erin", "quilted-morning-light-8", "behind-the-painting").await;

    ctx.accounts.disable(user.id).await.unwrap();
    assert!(ctx.sessions.login("erin", "quilted-morning-light-8").await.is_err());

    ctx.accounts.enable(user.id).await.unwrap();
    ctx.sessions.login("erin", "quilted-morning-light-8").await.unwrap();
}
