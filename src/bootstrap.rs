use std::sync::Arc;

use crate::api::AppState;
use crate::database::Database;
use crate::domain::errors::DomainResult;
use crate::domain::policy::PolicyDocument;
use crate::domain::ports::cache::PermissionCache;
use crate::domain::ports::role_repository::RoleRepository;
use crate::domain::ports::user_role_repository::UserRoleRepository;
use crate::models::{Role, RoleManagementType};
use crate::services::{MemoryCache, PermissionService, RoleService, UserRoleService};

/// Default system roles, created once on first boot. The `"*"` entries are
/// kept verbatim from the original seed data even though the evaluator
/// matches resources literally.
const SYSTEM_ROLES: &[(&str, &str, &str)] = &[
    (
        "Owner",
        "Full access to all operations across the system",
        r#"{"data":{"view":["*"],"edit":["*"]},"features":{"execute":["*"]}}"#,
    ),
    (
        "Manager",
        "Can view/edit users, view organization, approve requests, and generate reports",
        r#"{"data":{"view":["user_basic_info","user_sensitive_info","organization","task","client"],"edit":["user_basic_info","task"]},"features":{"execute":["approve_requests","generate_reports","assign_task"]}}"#,
    ),
    (
        "User",
        "Can view and edit own profile only",
        r#"{"data":{"view":["user_basic_info"],"edit":["user_basic_info"]},"features":{"execute":[]}}"#,
    ),
    (
        "Operator",
        "System operations and monitoring capabilities",
        r#"{"data":{"view":["*"],"edit":["task","client"]},"features":{"execute":["system_monitoring","backup_operations","generate_reports"]}}"#,
    ),
];

/// Seed the system-managed roles if none exist yet. Safe to run on every
/// startup.
pub async fn seed_system_roles(db: &Database) -> DomainResult<()> {
    tracing::info!("Starting data seeding...");

    let system_role_count = db
        .count_by_management_type(RoleManagementType::SystemManaged)
        .await?;
    if system_role_count > 0 {
        tracing::info!(
            "System roles already exist ({} found), skipping seeding.",
            system_role_count
        );
        return Ok(());
    }

    tracing::info!("No system roles found, creating initial roles...");
    for (role_name, description, policy_json) in SYSTEM_ROLES {
        if db
            .get_role_by_name_and_organization(role_name, None)
            .await?
            .is_some()
        {
            tracing::debug!("System role '{}' already exists, skipping creation.", role_name);
            continue;
        }

        let policy = PolicyDocument::parse(policy_json)?;
        let role = Role::new(
            role_name.to_string(),
            None,
            RoleManagementType::SystemManaged,
            Some(description.to_string()),
            policy,
            "system".to_string(),
        );
        db.create_role(&role).await?;
        tracing::info!("Created system role: {} with UUID: {}", role_name, role.role_uuid);
    }

    tracing::info!("Data seeding completed.");
    Ok(())
}

pub fn build_app_state(db: Database) -> AppState {
    let cache: Arc<dyn PermissionCache> = Arc::new(MemoryCache::new());
    let role_repo: Arc<dyn RoleRepository> = Arc::new(db.clone());
    let user_role_repo: Arc<dyn UserRoleRepository> = Arc::new(db.clone());

    let role_service = RoleService::new(role_repo.clone(), cache.clone());
    let user_role_service =
        UserRoleService::new(user_role_repo.clone(), role_repo.clone(), cache.clone());
    let permission_service = PermissionService::new(user_role_repo, role_repo, cache);
    tracing::info!("Services initialized");

    AppState {
        role_service,
        user_role_service,
        permission_service,
    }
}
