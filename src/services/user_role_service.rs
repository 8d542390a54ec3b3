use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::cache::{
    PermissionCache, NS_PERMISSIONS, NS_USER_ROLES, USER_ROLES_TTL,
};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::ports::user_role_repository::UserRoleRepository;
use crate::models::{RoleManagementType, UserRole, UserRoleAssignmentResponse};

#[derive(Clone)]
pub struct UserRoleService {
    user_roles: Arc<dyn UserRoleRepository>,
    roles: Arc<dyn RoleRepository>,
    cache: Arc<dyn PermissionCache>,
}

impl UserRoleService {
    pub fn new(
        user_roles: Arc<dyn UserRoleRepository>,
        roles: Arc<dyn RoleRepository>,
        cache: Arc<dyn PermissionCache>,
    ) -> Self {
        Self {
            user_roles,
            roles,
            cache,
        }
    }

    /// Assign a role to a user within an organization.
    ///
    /// Customer-managed roles can only be bound inside their own
    /// organization; system-managed roles are assignable anywhere.
    pub async fn assign_role(
        &self,
        user_uuid: &str,
        role_uuid: &str,
        organization_uuid: &str,
        assigner_uuid: &str,
    ) -> DomainResult<UserRoleAssignmentResponse> {
        tracing::info!(
            "Assigning role {} to user {} in organization {}",
            role_uuid,
            user_uuid,
            organization_uuid
        );

        let role = self
            .roles
            .get_role_by_uuid(role_uuid)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Role not found: {}", role_uuid)))?;

        if role.role_management_type == RoleManagementType::CustomerManaged
            && role.organization_uuid.as_deref() != Some(organization_uuid)
        {
            return Err(DomainError::Conflict(
                "Role does not belong to the specified organization".to_string(),
            ));
        }

        if self
            .user_roles
            .assignment_exists(user_uuid, role_uuid, organization_uuid)
            .await?
        {
            return Err(DomainError::Conflict(
                "Role is already assigned to user in this organization".to_string(),
            ));
        }

        let user_role = UserRole::new(
            user_uuid.to_string(),
            role_uuid.to_string(),
            organization_uuid.to_string(),
            assigner_uuid.to_string(),
        );
        self.user_roles.create_assignment(&user_role).await?;
        self.invalidate();

        tracing::info!("Role assigned successfully to user: {}", user_uuid);
        Ok(user_role.into())
    }

    /// Remove a role binding. Bindings are never updated in place; callers
    /// revoke and reassign instead.
    pub async fn remove_role(
        &self,
        user_uuid: &str,
        role_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<()> {
        tracing::info!(
            "Removing role {} from user {} in organization {}",
            role_uuid,
            user_uuid,
            organization_uuid
        );

        if !self
            .user_roles
            .assignment_exists(user_uuid, role_uuid, organization_uuid)
            .await?
        {
            return Err(DomainError::NotFound(
                "Role assignment not found".to_string(),
            ));
        }

        self.user_roles
            .delete_assignment(user_uuid, role_uuid, organization_uuid)
            .await?;
        self.invalidate();

        tracing::info!("Role removed successfully from user: {}", user_uuid);
        Ok(())
    }

    pub async fn list_user_roles(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<Vec<UserRoleAssignmentResponse>> {
        let cache_key = format!("{}_{}", user_uuid, organization_uuid);
        if let Some(cached) = self.cached(&cache_key) {
            return Ok(cached);
        }

        let user_roles = self
            .user_roles
            .find_by_user_and_organization(user_uuid, organization_uuid)
            .await?;
        let responses: Vec<UserRoleAssignmentResponse> =
            user_roles.into_iter().map(Into::into).collect();
        self.store(&cache_key, &responses);
        Ok(responses)
    }

    pub async fn list_user_roles_by_organization(
        &self,
        organization_uuid: &str,
    ) -> DomainResult<Vec<UserRoleAssignmentResponse>> {
        let cache_key = format!("org_{}", organization_uuid);
        if let Some(cached) = self.cached(&cache_key) {
            return Ok(cached);
        }

        let user_roles = self
            .user_roles
            .find_by_organization(organization_uuid)
            .await?;
        let responses: Vec<UserRoleAssignmentResponse> =
            user_roles.into_iter().map(Into::into).collect();
        self.store(&cache_key, &responses);
        Ok(responses)
    }

    pub async fn user_has_role(
        &self,
        user_uuid: &str,
        role_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<bool> {
        self.user_roles
            .assignment_exists(user_uuid, role_uuid, organization_uuid)
            .await
    }

    pub async fn count_user_roles(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<i64> {
        self.user_roles
            .count_by_user_and_organization(user_uuid, organization_uuid)
            .await
    }

    fn invalidate(&self) {
        self.cache.invalidate_all(NS_USER_ROLES);
        self.cache.invalidate_all(NS_PERMISSIONS);
    }

    fn cached(&self, key: &str) -> Option<Vec<UserRoleAssignmentResponse>> {
        self.cache
            .get(NS_USER_ROLES, key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    fn store(&self, key: &str, responses: &[UserRoleAssignmentResponse]) {
        if let Ok(value) = serde_json::to_value(responses) {
            self.cache.put(NS_USER_ROLES, key, value, USER_ROLES_TTL);
        }
    }
}
