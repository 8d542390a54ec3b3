use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

use crate::database::Database;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::policy::PolicyDocument;
use crate::domain::ports::role_repository::RoleRepository;
use crate::models::{now_rfc3339, Role, RoleManagementType};

const ROLE_COLUMNS: &str = "role_uuid, role_name, organization_uuid, role_management_type, \
     description, policy, created_at, updated_at, created_by";

fn role_from_row(row: &AnyRow) -> DomainResult<Role> {
    let policy_json: String = row
        .try_get("policy")
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    // A stored policy that no longer parses must not fail reads; the role
    // simply grants nothing until it is fixed through an update.
    let policy: PolicyDocument = serde_json::from_str(&policy_json).unwrap_or_else(|e| {
        tracing::warn!("Unparsable stored policy, treating as empty: {}", e);
        PolicyDocument::default()
    });

    let management_type: String = row
        .try_get("role_management_type")
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(Role {
        role_uuid: row
            .try_get("role_uuid")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        role_name: row
            .try_get("role_name")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        organization_uuid: row
            .try_get::<Option<String>, _>("organization_uuid")
            .ok()
            .flatten(),
        role_management_type: RoleManagementType::from_str(&management_type)?,
        description: row
            .try_get::<Option<String>, _>("description")
            .ok()
            .flatten(),
        policy,
        created_at: row
            .try_get("created_at")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        created_by: row
            .try_get("created_by")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
    })
}

#[async_trait]
impl RoleRepository for Database {
    async fn get_role_by_uuid(&self, role_uuid: &str) -> DomainResult<Option<Role>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM roles WHERE role_uuid = ?",
            ROLE_COLUMNS
        ))
        .bind(role_uuid)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        row.as_ref().map(role_from_row).transpose()
    }

    async fn list_roles_by_organization(
        &self,
        organization_uuid: &str,
    ) -> DomainResult<Vec<Role>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM roles WHERE organization_uuid = ? ORDER BY role_name",
            ROLE_COLUMNS
        ))
        .bind(organization_uuid)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.iter().map(role_from_row).collect()
    }

    async fn list_system_managed_roles(&self) -> DomainResult<Vec<Role>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM roles
             WHERE role_management_type = 'system_managed' AND organization_uuid IS NULL
             ORDER BY role_name",
            ROLE_COLUMNS
        ))
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.iter().map(role_from_row).collect()
    }

    async fn get_role_by_name_and_organization(
        &self,
        role_name: &str,
        organization_uuid: Option<&str>,
    ) -> DomainResult<Option<Role>> {
        let row = match organization_uuid {
            Some(org) => {
                sqlx::query(&format!(
                    "SELECT {} FROM roles WHERE role_name = ? AND organization_uuid = ?",
                    ROLE_COLUMNS
                ))
                .bind(role_name)
                .bind(org)
                .fetch_optional(self.pool())
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM roles WHERE role_name = ? AND organization_uuid IS NULL",
                    ROLE_COLUMNS
                ))
                .bind(role_name)
                .fetch_optional(self.pool())
                .await
            }
        }
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        row.as_ref().map(role_from_row).transpose()
    }

    async fn role_name_exists(
        &self,
        role_name: &str,
        organization_uuid: Option<&str>,
    ) -> DomainResult<bool> {
        let row = match organization_uuid {
            Some(org) => {
                sqlx::query(
                    "SELECT COUNT(*) as count FROM roles
                     WHERE role_name = ? AND organization_uuid = ?",
                )
                .bind(role_name)
                .bind(org)
                .fetch_one(self.pool())
                .await
            }
            None => {
                sqlx::query(
                    "SELECT COUNT(*) as count FROM roles
                     WHERE role_name = ? AND organization_uuid IS NULL",
                )
                .bind(role_name)
                .fetch_one(self.pool())
                .await
            }
        }
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let count: i64 = row.try_get("count").unwrap_or(0);
        Ok(count > 0)
    }

    async fn create_role(&self, role: &Role) -> DomainResult<()> {
        let policy_json = serde_json::to_string(&role.policy)
            .map_err(|e| DomainError::Internal(format!("Serialization error: {}", e)))?;

        sqlx::query(
            "INSERT INTO roles (role_uuid, role_name, organization_uuid, role_management_type,
                                description, policy, created_at, updated_at, created_by)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&role.role_uuid)
        .bind(&role.role_name)
        .bind(&role.organization_uuid)
        .bind(role.role_management_type.as_str())
        .bind(&role.description)
        .bind(&policy_json)
        .bind(&role.created_at)
        .bind(&role.updated_at)
        .bind(&role.created_by)
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn update_role(
        &self,
        role_uuid: &str,
        role_name: &str,
        description: Option<&str>,
        policy_json: &str,
    ) -> DomainResult<()> {
        sqlx::query(
            "UPDATE roles SET role_name = ?, description = ?, policy = ?, updated_at = ?
             WHERE role_uuid = ?",
        )
        .bind(role_name)
        .bind(description)
        .bind(policy_json)
        .bind(now_rfc3339())
        .bind(role_uuid)
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn delete_role(&self, role_uuid: &str) -> DomainResult<()> {
        sqlx::query("DELETE FROM roles WHERE role_uuid = ?")
            .bind(role_uuid)
            .execute(self.pool())
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn count_by_management_type(
        &self,
        management_type: RoleManagementType,
    ) -> DomainResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM roles WHERE role_management_type = ?",
        )
        .bind(management_type.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(row.try_get("count").unwrap_or(0))
    }
}
