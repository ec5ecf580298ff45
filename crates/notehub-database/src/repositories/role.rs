//! Role and role-assignment repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_entity::role::{CreateRole, Role};

/// Repository for role administration and the `user_roles` join table.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new role. Name and slug are both unique.
    pub async fn create(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, slug, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("roles_name_key") => {
                AppError::conflict(format!("Role with name '{}' already exists", data.name))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("roles_slug_key") => {
                AppError::conflict(format!("Role with slug '{}' already exists", data.slug))
            }
            _ => AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to create role", e),
        })
    }

    /// Find a role by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PersistenceUnavailable,
                    "Failed to find role by slug",
                    e,
                )
            })
    }

    /// List all roles ordered by slug.
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY slug ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to list roles", e)
            })
    }

    /// Update a role's description.
    pub async fn update_description(
        &self,
        role_id: Uuid,
        description: Option<&str>,
    ) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET description = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(role_id)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to update role", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Role {role_id} not found")))
    }

    /// Delete a role. Assignments cascade with the row.
    pub async fn delete(&self, role_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(role_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to delete role", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign a role (by slug) to a user.
    ///
    /// A duplicate assignment is a conflict; an unknown user or slug is
    /// not-found.
    pub async fn assign(&self, user_id: Uuid, role_slug: &str) -> AppResult<()> {
        let role = self
            .find_by_slug(role_slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Role with slug '{role_slug}' not found")))?;

        let result = sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, role_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(role.id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("user_roles_user_id_fkey") =>
            {
                AppError::not_found(format!("User {user_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to assign role", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "User {user_id} already has the role '{role_slug}'"
            )));
        }
        Ok(())
    }

    /// Remove a role assignment (by slug) from a user.
    pub async fn remove(&self, user_id: Uuid, role_slug: &str) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM user_roles ur USING roles r \
             WHERE ur.role_id = r.id AND ur.user_id = $1 AND r.slug = $2",
        )
        .bind(user_id)
        .bind(role_slug)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to remove role", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "User {user_id} does not have the role '{role_slug}'"
            )));
        }
        Ok(())
    }

    /// Resolve the role slugs assigned to a user.
    pub async fn slugs_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT r.slug FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = $1 ORDER BY r.slug ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::PersistenceUnavailable,
                "Failed to resolve user roles",
                e,
            )
        })
    }

    /// List the full roles assigned to a user.
    pub async fn roles_for_user(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT r.* FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = $1 ORDER BY r.slug ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::PersistenceUnavailable, "Failed to list user roles", e)
        })
    }
}
