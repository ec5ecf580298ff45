//! RBAC evaluation over the flat role model.
//!
//! Roles are an unordered set with OR-semantics: holding any one of
//! the required slugs grants access. There is no hierarchy and no
//! inheritance. Role and assignment mutations take effect on the next
//! check because every decision re-resolves the join — nothing is
//! cached across requests.

use tracing::debug;
use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_database::repositories::role::RoleRepository;
use notehub_database::repositories::user::UserRepository;

/// Evaluates authorization decisions for users against required role
/// slugs.
#[derive(Debug, Clone)]
pub struct RbacEngine {
    /// User lookups for the defensive status re-check.
    users: UserRepository,
    /// Role slug resolution.
    roles: RoleRepository,
}

impl RbacEngine {
    /// Creates a new engine.
    pub fn new(users: UserRepository, roles: RoleRepository) -> Self {
        Self { users, roles }
    }

    /// Decides whether a user holds any of the required role slugs.
    ///
    /// A disabled or soft-deleted user is denied regardless of role
    /// membership; token validation already checks this upstream, and
    /// the engine re-asserts it here. An empty requirement set denies.
    pub async fn authorize(&self, user_id: Uuid, required_slugs: &[&str]) -> AppResult<bool> {
        if required_slugs.is_empty() {
            return Ok(false);
        }

        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(false);
        };
        if !user.can_authenticate() {
            return Ok(false);
        }

        let held = self.roles.slugs_for_user(user_id).await?;
        let allowed = has_any_role(&held, required_slugs);

        debug!(
            user_id = %user_id,
            required = ?required_slugs,
            allowed,
            "Authorization decision"
        );
        Ok(allowed)
    }

    /// Like [`authorize`](Self::authorize) but returns
    /// `InsufficientRole` on denial.
    pub async fn require_any(&self, user_id: Uuid, required_slugs: &[&str]) -> AppResult<()> {
        if self.authorize(user_id, required_slugs).await? {
            Ok(())
        } else {
            Err(AppError::insufficient_role(
                "You do not have permission to perform this action",
            ))
        }
    }
}

/// Set-intersection check: does the held slug set overlap the required
/// set?
fn has_any_role(held: &[String], required: &[&str]) -> bool {
    required.iter().any(|r| held.iter().any(|h| h == r))
}
