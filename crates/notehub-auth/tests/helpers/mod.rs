//! Shared helpers for database-backed integration tests.
//!
//! These tests need a reachable PostgreSQL instance named by
//! `DATABASE_URL` and are `#[ignore]`d by default. Each test starts by
//! wiping the tables, so run them serially:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -- --ignored --test-threads=1
//! ```

#![allow(dead_code)]

use sqlx::PgPool;
use uuid::Uuid;

use notehub_auth::jwt::JwtDecoder;
use notehub_auth::password::CredentialHasher;
use notehub_auth::{AccountManager, NoteLockManager, RbacEngine, SessionManager};
use notehub_core::config::auth::AuthConfig;
use notehub_core::config::database::DatabaseConfig;
use notehub_database::repositories::access_token::AccessTokenRepository;
use notehub_database::repositories::note::NoteRepository;
use notehub_database::repositories::refresh_token::RefreshTokenRepository;
use notehub_database::repositories::role::RoleRepository;
use notehub_database::repositories::user::UserRepository;
use notehub_entity::note::{CreateNote, Note};
use notehub_entity::role::CreateRole;
use notehub_entity::user::{CreateUser, User};

/// Everything a test needs: managers, repositories, and the raw pool
/// for direct state manipulation.
pub struct TestContext {
    pub pool: PgPool,
    pub config: AuthConfig,
    pub sessions: SessionManager,
    pub accounts: AccountManager,
    pub rbac: RbacEngine,
    pub note_lock: NoteLockManager,
    pub decoder: JwtDecoder,
    pub hasher: CredentialHasher,
    pub users: UserRepository,
    pub roles: RoleRepository,
    pub notes: NoteRepository,
    pub refresh_tokens: RefreshTokenRepository,
    pub access_tokens: AccessTokenRepository,
}

impl TestContext {
    /// Connects to the test database, migrates, and wipes all tables.
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("notehub=debug")
            .try_init();

        let url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set for integration tests");

        let pool = notehub_database::connection::connect(&DatabaseConfig {
            url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 300,
        })
        .await
        .expect("Failed to connect to test database");

        notehub_database::migration::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&pool).await;

        let config = AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..AuthConfig::default()
        };

        let hasher = CredentialHasher::new();
        let users = UserRepository::new(pool.clone());
        let roles = RoleRepository::new(pool.clone());

        Self {
            sessions: SessionManager::from_pool(pool.clone(), &config),
            accounts: AccountManager::from_pool(pool.clone(), &config),
            rbac: RbacEngine::new(users.clone(), roles.clone()),
            note_lock: NoteLockManager::new(users.clone(), hasher.clone()),
            decoder: JwtDecoder::new(&config),
            hasher,
            users,
            roles,
            notes: NoteRepository::new(pool.clone()),
            refresh_tokens: RefreshTokenRepository::new(pool.clone()),
            access_tokens: AccessTokenRepository::new(pool.clone()),
            config,
            pool,
        }
    }

    async fn clean_database(pool: &PgPool) {
        // Delete order respects foreign keys.
        for table in [
            "active_access_tokens",
            "refresh_tokens",
            "user_roles",
            "notes",
            "roles",
            "users",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(pool)
                .await
                .expect("Failed to clean table");
        }
    }

    /// Inserts a user directly, bypassing password policy.
    pub async fn create_user(&self, name: &str, password: &str, notes_secret: &str) -> User {
        self.users
            .create(&CreateUser {
                name: name.to_string(),
                hashed_password: self.hasher.hash(password).unwrap(),
                locked_notes_secret_hash: self.hasher.hash(notes_secret).unwrap(),
            })
            .await
            .expect("Failed to create test user")
    }

    /// Creates a role whose name equals its slug.
    pub async fn create_role(&self, slug: &str) -> notehub_entity::role::Role {
        self.roles
            .create(&CreateRole {
                name: slug.to_string(),
                slug: slug.to_string(),
                description: None,
            })
            .await
            .expect("Failed to create test role")
    }

    /// Creates a note for a user.
    pub async fn create_note(&self, owner_id: Uuid, title: &str, locked: bool) -> Note {
        self.notes
            .create(&CreateNote {
                owner_id,
                title: title.to_string(),
                content: "something worth keeping".to_string(),
                locked,
            })
            .await
            .expect("Failed to create test note")
    }

    /// Forces a refresh token row into the past.
    pub async fn expire_refresh_tokens(&self, user_id: Uuid) {
        sqlx::query(
            "UPDATE refresh_tokens SET expires_at = NOW() - INTERVAL '1 hour' WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .expect("Failed to expire refresh tokens");
    }

    /// Forces every access token record of a user into the past.
    pub async fn expire_access_tokens(&self, user_id: Uuid) {
        sqlx::query(
            "UPDATE active_access_tokens SET expires_at = NOW() - INTERVAL '1 hour' \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .expect("Failed to expire access tokens");
    }

    /// Counts live (unrevoked, unexpired) refresh tokens for a user.
    pub async fn live_refresh_count(&self, user_id: Uuid) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM refresh_tokens \
             WHERE user_id = $1 AND revoked = FALSE AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to count refresh tokens")
    }

    /// Counts access token records for a user.
    pub async fn access_record_count(&self, user_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM active_access_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count access token records")
    }
}
