use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::models::{Role, RoleManagementType};

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn get_role_by_uuid(&self, role_uuid: &str) -> DomainResult<Option<Role>>;
    async fn list_roles_by_organization(&self, organization_uuid: &str)
        -> DomainResult<Vec<Role>>;
    async fn list_system_managed_roles(&self) -> DomainResult<Vec<Role>>;
    async fn get_role_by_name_and_organization(
        &self,
        role_name: &str,
        organization_uuid: Option<&str>,
    ) -> DomainResult<Option<Role>>;
    async fn role_name_exists(
        &self,
        role_name: &str,
        organization_uuid: Option<&str>,
    ) -> DomainResult<bool>;
    async fn create_role(&self, role: &Role) -> DomainResult<()>;
    async fn update_role(
        &self,
        role_uuid: &str,
        role_name: &str,
        description: Option<&str>,
        policy_json: &str,
    ) -> DomainResult<()>;
    async fn delete_role(&self, role_uuid: &str) -> DomainResult<()>;
    async fn count_by_management_type(
        &self,
        management_type: RoleManagementType,
    ) -> DomainResult<i64>;
}
