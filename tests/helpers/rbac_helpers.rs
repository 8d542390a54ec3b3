use std::sync::Arc;

use rolegate::database::Database;
use rolegate::domain::ports::cache::PermissionCache;
use rolegate::domain::ports::role_repository::RoleRepository;
use rolegate::domain::ports::user_role_repository::UserRoleRepository;
use rolegate::models::{CreateRoleRequest, RoleManagementType, RoleResponse};
use rolegate::services::{MemoryCache, PermissionService, RoleService, UserRoleService};

use super::test_db::setup_test_db;

pub struct TestContext {
    pub db: Database,
    pub cache: Arc<MemoryCache>,
    pub roles: RoleService,
    pub user_roles: UserRoleService,
    pub permissions: PermissionService,
}

pub async fn setup() -> TestContext {
    let db = setup_test_db().await;
    let cache = Arc::new(MemoryCache::new());
    let cache_port: Arc<dyn PermissionCache> = cache.clone();
    let role_repo: Arc<dyn RoleRepository> = Arc::new(db.clone());
    let user_role_repo: Arc<dyn UserRoleRepository> = Arc::new(db.clone());

    TestContext {
        roles: RoleService::new(role_repo.clone(), cache_port.clone()),
        user_roles: UserRoleService::new(
            user_role_repo.clone(),
            role_repo.clone(),
            cache_port.clone(),
        ),
        permissions: PermissionService::new(user_role_repo, role_repo, cache_port),
        db,
        cache,
    }
}

pub async fn create_customer_role(
    ctx: &TestContext,
    role_name: &str,
    organization_uuid: &str,
    policy: &str,
) -> RoleResponse {
    ctx.roles
        .create_role(
            CreateRoleRequest {
                role_name: role_name.to_string(),
                description: Some(format!("{} role", role_name)),
                role_management_type: RoleManagementType::CustomerManaged,
                policy: serde_json::from_str(policy).expect("helper policy should be valid JSON"),
            },
            Some(organization_uuid.to_string()),
            "test-admin",
        )
        .await
        .expect("Failed to create test role")
}

pub async fn create_system_role(ctx: &TestContext, role_name: &str, policy: &str) -> RoleResponse {
    ctx.roles
        .create_role(
            CreateRoleRequest {
                role_name: role_name.to_string(),
                description: Some(format!("{} role", role_name)),
                role_management_type: RoleManagementType::SystemManaged,
                policy: serde_json::from_str(policy).expect("helper policy should be valid JSON"),
            },
            None,
            "test-admin",
        )
        .await
        .expect("Failed to create test system role")
}

pub async fn assign(ctx: &TestContext, user_uuid: &str, role_uuid: &str, organization_uuid: &str) {
    ctx.user_roles
        .assign_role(user_uuid, role_uuid, organization_uuid, "test-admin")
        .await
        .expect("Failed to assign test role");
}
