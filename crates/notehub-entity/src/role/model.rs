//! Role and role-assignment entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A role in the flat RBAC model.
///
/// Roles carry no hierarchy; a user's permissions are exactly the set
/// of roles assigned to them, OR-combined at authorization time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique human-readable name.
    pub name: String,
    /// Unique, stable machine identifier used in authorization checks.
    pub slug: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A user-to-role assignment row, unique per `(user_id, role_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRoleAssignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// The assigned user.
    pub user_id: Uuid,
    /// The assigned role.
    pub role_id: Uuid,
    /// When the assignment was made.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Unique human-readable name.
    pub name: String,
    /// Unique machine identifier.
    pub slug: String,
    /// Optional description.
    pub description: Option<String>,
}
