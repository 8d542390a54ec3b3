use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user holding a role within an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    pub user_role_uuid: String,
    pub user_uuid: String,
    pub role_uuid: String,
    pub organization_uuid: String,
    pub created_at: String,
    pub created_by: String,
}

impl UserRole {
    pub fn new(
        user_uuid: String,
        role_uuid: String,
        organization_uuid: String,
        created_by: String,
    ) -> Self {
        Self {
            user_role_uuid: Uuid::new_v4().to_string(),
            user_uuid,
            role_uuid,
            organization_uuid,
            created_at: super::now_rfc3339(),
            created_by,
        }
    }
}

// DTOs for API

#[derive(Debug, Deserialize)]
pub struct UserRoleAssignmentRequest {
    pub role_uuid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleAssignmentResponse {
    pub user_role_uuid: String,
    pub user_uuid: String,
    pub role_uuid: String,
    pub organization_uuid: String,
    pub created_at: String,
}

impl From<UserRole> for UserRoleAssignmentResponse {
    fn from(user_role: UserRole) -> Self {
        UserRoleAssignmentResponse {
            user_role_uuid: user_role.user_role_uuid,
            user_uuid: user_role.user_uuid,
            role_uuid: user_role.role_uuid,
            organization_uuid: user_role.organization_uuid,
            created_at: user_role.created_at,
        }
    }
}
