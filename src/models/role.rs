use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::policy::PolicyDocument;

pub const MAX_ROLE_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// How a role is managed. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleManagementType {
    /// Centrally managed, visible to every organization. No organization uuid.
    #[serde(rename = "system_managed")]
    SystemManaged,
    /// Created and managed within one customer organization.
    #[serde(rename = "customer_managed")]
    CustomerManaged,
}

impl RoleManagementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleManagementType::SystemManaged => "system_managed",
            RoleManagementType::CustomerManaged => "customer_managed",
        }
    }

    pub fn from_str(value: &str) -> DomainResult<Self> {
        match value {
            "system_managed" => Ok(RoleManagementType::SystemManaged),
            "customer_managed" => Ok(RoleManagementType::CustomerManaged),
            other => Err(DomainError::Validation(format!(
                "Unknown role management type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub role_uuid: String,
    pub role_name: String,
    /// None for system-managed roles, Some for customer-managed ones.
    pub organization_uuid: Option<String>,
    pub role_management_type: RoleManagementType,
    pub description: Option<String>,
    pub policy: PolicyDocument,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
}

impl Role {
    pub fn new(
        role_name: String,
        organization_uuid: Option<String>,
        role_management_type: RoleManagementType,
        description: Option<String>,
        policy: PolicyDocument,
        created_by: String,
    ) -> Self {
        let now = super::now_rfc3339();

        Self {
            role_uuid: Uuid::new_v4().to_string(),
            role_name,
            organization_uuid,
            role_management_type,
            description,
            policy,
            created_at: now.clone(),
            updated_at: now,
            created_by,
        }
    }
}

// DTOs for API

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub role_name: String,
    pub description: Option<String>,
    pub role_management_type: RoleManagementType,
    /// Policy document as raw JSON; validated and decoded by the service.
    pub policy: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role_name: String,
    pub description: Option<String>,
    pub policy: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub role_uuid: String,
    pub role_name: String,
    pub organization_uuid: Option<String>,
    pub role_management_type: RoleManagementType,
    pub description: Option<String>,
    pub policy: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        RoleResponse {
            role_uuid: role.role_uuid,
            role_name: role.role_name,
            organization_uuid: role.organization_uuid,
            role_management_type: role.role_management_type,
            description: role.description,
            policy: role.policy.to_json(),
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PermissionCheckRequest {
    pub action: String,
    pub resource: String,
    pub resource_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointPermissionCheckRequest {
    pub endpoint: String,
    pub resource_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheckResponse {
    pub has_permission: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_scope: Option<String>,
}

impl PermissionCheckResponse {
    pub fn denied() -> Self {
        Self {
            has_permission: false,
            role_uuid: None,
            role_name: None,
            granted_scope: None,
        }
    }

    pub fn granted(role_uuid: String, role_name: String) -> Self {
        Self {
            has_permission: true,
            role_uuid: Some(role_uuid),
            role_name: Some(role_name),
            // Scope discriminator is a fixed label for now.
            granted_scope: Some("team".to_string()),
        }
    }
}
