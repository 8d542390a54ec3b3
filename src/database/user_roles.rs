use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

use crate::database::Database;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::user_role_repository::UserRoleRepository;
use crate::models::UserRole;

fn user_role_from_row(row: &AnyRow) -> DomainResult<UserRole> {
    Ok(UserRole {
        user_role_uuid: row
            .try_get("user_role_uuid")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        user_uuid: row
            .try_get("user_uuid")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        role_uuid: row
            .try_get("role_uuid")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        organization_uuid: row
            .try_get("organization_uuid")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
        created_by: row
            .try_get("created_by")
            .map_err(|e| DomainError::Internal(e.to_string()))?,
    })
}

#[async_trait]
impl UserRoleRepository for Database {
    async fn find_by_user_and_organization(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<Vec<UserRole>> {
        let rows = sqlx::query(
            "SELECT user_role_uuid, user_uuid, role_uuid, organization_uuid, created_at, created_by
             FROM user_roles
             WHERE user_uuid = ? AND organization_uuid = ?
             ORDER BY created_at, user_role_uuid",
        )
        .bind(user_uuid)
        .bind(organization_uuid)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.iter().map(user_role_from_row).collect()
    }

    async fn find_by_organization(&self, organization_uuid: &str) -> DomainResult<Vec<UserRole>> {
        let rows = sqlx::query(
            "SELECT user_role_uuid, user_uuid, role_uuid, organization_uuid, created_at, created_by
             FROM user_roles
             WHERE organization_uuid = ?
             ORDER BY created_at, user_role_uuid",
        )
        .bind(organization_uuid)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        rows.iter().map(user_role_from_row).collect()
    }

    async fn assignment_exists(
        &self,
        user_uuid: &str,
        role_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<bool> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM user_roles
             WHERE user_uuid = ? AND role_uuid = ? AND organization_uuid = ?",
        )
        .bind(user_uuid)
        .bind(role_uuid)
        .bind(organization_uuid)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let count: i64 = row.try_get("count").unwrap_or(0);
        Ok(count > 0)
    }

    async fn create_assignment(&self, user_role: &UserRole) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO user_roles (user_role_uuid, user_uuid, role_uuid, organization_uuid,
                                     created_at, created_by)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user_role.user_role_uuid)
        .bind(&user_role.user_uuid)
        .bind(&user_role.role_uuid)
        .bind(&user_role.organization_uuid)
        .bind(&user_role.created_at)
        .bind(&user_role.created_by)
        .execute(self.pool())
        .await
        .map_err(|e| {
            // Two racing assigns resolve at the unique index; the loser gets
            // the same conflict as an up-front duplicate.
            if let sqlx::Error::Database(db_err) = &e {
                let message = db_err.message();
                if message.contains("UNIQUE") || message.contains("unique") {
                    return DomainError::Conflict(
                        "Role is already assigned to user in this organization".to_string(),
                    );
                }
            }
            DomainError::Internal(e.to_string())
        })?;

        Ok(())
    }

    async fn delete_assignment(
        &self,
        user_uuid: &str,
        role_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<()> {
        sqlx::query(
            "DELETE FROM user_roles
             WHERE user_uuid = ? AND role_uuid = ? AND organization_uuid = ?",
        )
        .bind(user_uuid)
        .bind(role_uuid)
        .bind(organization_uuid)
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn count_by_user_and_organization(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM user_roles
             WHERE user_uuid = ? AND organization_uuid = ?",
        )
        .bind(user_uuid)
        .bind(organization_uuid)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(row.try_get("count").unwrap_or(0))
    }
}
