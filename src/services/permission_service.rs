use std::sync::Arc;

use crate::domain::endpoint::map_endpoint;
use crate::domain::errors::DomainResult;
use crate::domain::ports::cache::{PermissionCache, NS_PERMISSIONS, PERMISSIONS_TTL};
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::ports::user_role_repository::UserRoleRepository;
use crate::models::{PermissionCheckRequest, PermissionCheckResponse};

/// Permission evaluator. Decides allow/deny for a user's (action, resource)
/// target by walking their role bindings in order; the first role whose
/// policy grants the pair wins.
///
/// Evaluation fails closed: storage errors, dangling bindings and malformed
/// uuids all collapse into a deny, never an error to the caller.
#[derive(Clone)]
pub struct PermissionService {
    user_roles: Arc<dyn UserRoleRepository>,
    roles: Arc<dyn RoleRepository>,
    cache: Arc<dyn PermissionCache>,
}

impl PermissionService {
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

    /// Direct check against a canonical (action, resource) pair.
    pub async fn check_permission(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
        request: &PermissionCheckRequest,
    ) -> PermissionCheckResponse {
        tracing::debug!(
            "Checking permission for user: {}, action: {}, resource: {}",
            user_uuid,
            request.action,
            request.resource
        );

        let cache_key = format!(
            "{}_{}_{}_{}",
            user_uuid, organization_uuid, request.action, request.resource
        );
        if let Some(cached) = self.cached(&cache_key) {
            return cached;
        }

        let response = match self
            .evaluate(user_uuid, organization_uuid, &request.action, &request.resource)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error checking permission for user {}: {}", user_uuid, e);
                PermissionCheckResponse::denied()
            }
        };

        self.store(&cache_key, &response);
        response
    }

    /// Gateway-style check: resolve the endpoint to an (action, resource)
    /// pair first. Unknown endpoints deny without touching storage.
    pub async fn check_permission_by_endpoint(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
        endpoint: &str,
        resource_id: Option<String>,
    ) -> PermissionCheckResponse {
        tracing::debug!(
            "Checking permission by endpoint for user: {}, endpoint: {}",
            user_uuid,
            endpoint
        );

        let Some(mapping) = map_endpoint(endpoint) else {
            tracing::warn!("Unknown endpoint: {}", endpoint);
            return PermissionCheckResponse::denied();
        };

        let cache_key = format!("{}_{}_{}", user_uuid, organization_uuid, endpoint);
        if let Some(cached) = self.cached(&cache_key) {
            return cached;
        }

        let mapped = PermissionCheckRequest {
            action: mapping.action.to_string(),
            resource: mapping.resource.to_string(),
            resource_id,
        };
        let response = self
            .check_permission(user_uuid, organization_uuid, &mapped)
            .await;

        self.store(&cache_key, &response);
        response
    }

    async fn evaluate(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
        action: &str,
        resource: &str,
    ) -> DomainResult<PermissionCheckResponse> {
        let bindings = self
            .user_roles
            .find_by_user_and_organization(user_uuid, organization_uuid)
            .await?;

        if bindings.is_empty() {
            tracing::debug!(
                "No roles found for user: {} in organization: {}",
                user_uuid,
                organization_uuid
            );
            return Ok(PermissionCheckResponse::denied());
        }

        for binding in &bindings {
            // A binding whose role no longer resolves (deleted after
            // assignment, or a malformed uuid) is skipped, not fatal.
            let role = match self.roles.get_role_by_uuid(&binding.role_uuid).await {
                Ok(Some(role)) => role,
                Ok(None) => {
                    tracing::warn!(
                        "Binding {} references missing role {}",
                        binding.user_role_uuid,
                        binding.role_uuid
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to resolve role {} for binding {}: {}",
                        binding.role_uuid,
                        binding.user_role_uuid,
                        e
                    );
                    continue;
                }
            };

            if role.policy.grants(action, resource) {
                tracing::debug!(
                    "Permission granted for user: {} with role: {}",
                    user_uuid,
                    role.role_name
                );
                return Ok(PermissionCheckResponse::granted(
                    role.role_uuid,
                    role.role_name,
                ));
            }
        }

        tracing::debug!(
            "Permission denied for user: {} action: {} resource: {}",
            user_uuid,
            action,
            resource
        );
        Ok(PermissionCheckResponse::denied())
    }

    fn cached(&self, key: &str) -> Option<PermissionCheckResponse> {
        self.cache
            .get(NS_PERMISSIONS, key)
            .and_then(|v| serde_json::from_value(v).ok())
    }

    fn store(&self, key: &str, response: &PermissionCheckResponse) {
        if let Ok(value) = serde_json::to_value(response) {
            self.cache.put(NS_PERMISSIONS, key, value, PERMISSIONS_TTL);
        }
    }
}
