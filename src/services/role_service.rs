use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::policy::PolicyDocument;
use crate::domain::ports::cache::{PermissionCache, NS_PERMISSIONS, NS_ROLES, ROLES_TTL};
use crate::domain::ports::role_repository::RoleRepository;
use crate::models::{
    CreateRoleRequest, Role, RoleManagementType, RoleResponse, UpdateRoleRequest,
    MAX_DESCRIPTION_LEN, MAX_ROLE_NAME_LEN,
};

#[derive(Clone)]
pub struct RoleService {
    repository: Arc<dyn RoleRepository>,
    cache: Arc<dyn PermissionCache>,
}

impl RoleService {
    pub fn new(repository: Arc<dyn RoleRepository>, cache: Arc<dyn PermissionCache>) -> Self {
        Self { repository, cache }
    }

    /// Create a new role. The organization uuid comes from the caller's
    /// identity context; system-managed roles always land in the null
    /// (global) scope regardless of it.
    pub async fn create_role(
        &self,
        request: CreateRoleRequest,
        organization_uuid: Option<String>,
        created_by: &str,
    ) -> DomainResult<RoleResponse> {
        tracing::info!("Creating role: {}", request.role_name);

        validate_role_name(&request.role_name)?;
        validate_description(request.description.as_deref())?;
        let policy = PolicyDocument::from_value(&request.policy)?;

        let organization_uuid = match request.role_management_type {
            RoleManagementType::CustomerManaged => Some(organization_uuid.ok_or_else(|| {
                DomainError::Validation(
                    "Customer-managed role requires an organization".to_string(),
                )
            })?),
            RoleManagementType::SystemManaged => None,
        };

        if self
            .repository
            .role_name_exists(&request.role_name, organization_uuid.as_deref())
            .await?
        {
            return Err(DomainError::Conflict(
                "Role name already exists in this organization".to_string(),
            ));
        }

        let role = Role::new(
            request.role_name,
            organization_uuid,
            request.role_management_type,
            request.description,
            policy,
            created_by.to_string(),
        );

        self.repository.create_role(&role).await?;
        self.invalidate();

        tracing::info!("Role created successfully: {}", role.role_uuid);
        Ok(role.into())
    }

    /// Update a role. Only name, description and policy are mutable; the
    /// management type and organization scope are fixed at creation.
    pub async fn update_role(
        &self,
        role_uuid: &str,
        request: UpdateRoleRequest,
    ) -> DomainResult<RoleResponse> {
        tracing::info!("Updating role: {}", role_uuid);

        let role = self
            .repository
            .get_role_by_uuid(role_uuid)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Role not found: {}", role_uuid)))?;

        validate_role_name(&request.role_name)?;
        validate_description(request.description.as_deref())?;
        let policy = PolicyDocument::from_value(&request.policy)?;

        if request.role_name != role.role_name
            && self
                .repository
                .role_name_exists(&request.role_name, role.organization_uuid.as_deref())
                .await?
        {
            return Err(DomainError::Conflict(
                "Role name already exists in this organization".to_string(),
            ));
        }

        let policy_json = serde_json::to_string(&policy)
            .map_err(|e| DomainError::Internal(format!("Serialization error: {}", e)))?;

        self.repository
            .update_role(
                role_uuid,
                &request.role_name,
                request.description.as_deref(),
                &policy_json,
            )
            .await?;
        self.invalidate();

        let updated = self
            .repository
            .get_role_by_uuid(role_uuid)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Role not found: {}", role_uuid)))?;

        tracing::info!("Role updated successfully: {}", role_uuid);
        Ok(updated.into())
    }

    /// Delete a role. System-managed roles are never deletable. Bindings
    /// referencing the deleted role are left in place; the evaluator skips
    /// them when they fail to resolve.
    pub async fn delete_role(&self, role_uuid: &str) -> DomainResult<()> {
        tracing::info!("Deleting role: {}", role_uuid);

        let role = self
            .repository
            .get_role_by_uuid(role_uuid)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Role not found: {}", role_uuid)))?;

        if role.role_management_type == RoleManagementType::SystemManaged {
            return Err(DomainError::Protected(
                "Cannot delete system-managed role".to_string(),
            ));
        }

        self.repository.delete_role(role_uuid).await?;
        self.invalidate();

        tracing::info!("Role deleted successfully: {}", role_uuid);
        Ok(())
    }

    pub async fn get_role(&self, role_uuid: &str) -> DomainResult<RoleResponse> {
        let cache_key = format!("id_{}", role_uuid);
        if let Some(cached) = self.cached_one(&cache_key) {
            return Ok(cached);
        }

        let role = self
            .repository
            .get_role_by_uuid(role_uuid)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Role not found: {}", role_uuid)))?;

        let response: RoleResponse = role.into();
        self.store_one(&cache_key, &response);
        Ok(response)
    }

    pub async fn list_roles_by_organization(
        &self,
        organization_uuid: &str,
    ) -> DomainResult<Vec<RoleResponse>> {
        let cache_key = format!("org_{}", organization_uuid);
        if let Some(cached) = self.cached_many(&cache_key) {
            return Ok(cached);
        }

        let roles = self
            .repository
            .list_roles_by_organization(organization_uuid)
            .await?;
        let responses: Vec<RoleResponse> = roles.into_iter().map(Into::into).collect();
        self.store_many(&cache_key, &responses);
        Ok(responses)
    }

    pub async fn list_system_managed_roles(&self) -> DomainResult<Vec<RoleResponse>> {
        let cache_key = "system_managed";
        if let Some(cached) = self.cached_many(cache_key) {
            return Ok(cached);
        }

        let roles = self.repository.list_system_managed_roles().await?;
        let responses: Vec<RoleResponse> = roles.into_iter().map(Into::into).collect();
        self.store_many(cache_key, &responses);
        Ok(responses)
    }

    pub async fn get_role_by_name(
        &self,
        role_name: &str,
        organization_uuid: Option<&str>,
    ) -> DomainResult<Option<RoleResponse>> {
        let cache_key = format!(
            "name_{}_{}",
            role_name,
            organization_uuid.unwrap_or("system")
        );
        if let Some(cached) = self.cached_one(&cache_key) {
            return Ok(Some(cached));
        }

        let role = self
            .repository
            .get_role_by_name_and_organization(role_name, organization_uuid)
            .await?;

        Ok(role.map(|r| {
            let response: RoleResponse = r.into();
            self.store_one(&cache_key, &response);
            response
        }))
    }

    // Role mutations evict permission results too: a policy edit must be
    // visible to the evaluator within the same request cycle, not after the
    // permission TTL runs out.
    fn invalidate(&self) {
        self.cache.invalidate_all(NS_ROLES);
        self.cache.invalidate_all(NS_PERMISSIONS);
    }

    fn cached_one(&self, key: &str) -> Option<RoleResponse> {
        self.cache
            .get(NS_ROLES, key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    fn store_one(&self, key: &str, response: &RoleResponse) {
        if let Ok(value) = serde_json::to_value(response) {
            self.cache.put(NS_ROLES, key, value, ROLES_TTL);
        }
    }

    fn cached_many(&self, key: &str) -> Option<Vec<RoleResponse>> {
        self.cache
            .get(NS_ROLES, key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    fn store_many(&self, key: &str, responses: &[RoleResponse]) {
        if let Ok(value) = serde_json::to_value(responses) {
            self.cache.put(NS_ROLES, key, value, ROLES_TTL);
        }
    }
}

// Length limits count characters, not bytes, so non-ASCII names are not
// penalized by their UTF-8 width.
fn validate_role_name(role_name: &str) -> DomainResult<()> {
    if role_name.trim().is_empty() {
        return Err(DomainError::Validation(
            "Role name cannot be empty".to_string(),
        ));
    }
    if role_name.chars().count() > MAX_ROLE_NAME_LEN {
        return Err(DomainError::Validation(format!(
            "Role name must not exceed {} characters",
            MAX_ROLE_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> DomainResult<()> {
    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::Validation(format!(
                "Description must not exceed {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
    }
    Ok(())
}
