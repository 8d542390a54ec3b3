use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::models::UserRole;

#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Bindings for one user in one organization, in insertion order.
    async fn find_by_user_and_organization(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<Vec<UserRole>>;
    async fn find_by_organization(&self, organization_uuid: &str) -> DomainResult<Vec<UserRole>>;
    async fn assignment_exists(
        &self,
        user_uuid: &str,
        role_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<bool>;
    async fn create_assignment(&self, user_role: &UserRole) -> DomainResult<()>;
    async fn delete_assignment(
        &self,
        user_uuid: &str,
        role_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<()>;
    async fn count_by_user_and_organization(
        &self,
        user_uuid: &str,
        organization_uuid: &str,
    ) -> DomainResult<i64>;
}
