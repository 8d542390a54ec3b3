pub mod middleware;
pub mod permissions;
pub mod roles;
pub mod user_roles;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{PermissionService, RoleService, UserRoleService};

#[derive(Clone)]
pub struct AppState {
    pub role_service: RoleService,
    pub user_role_service: UserRoleService,
    pub permission_service: PermissionService,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Permission checks
        .route("/permission/check", post(permissions::check_permission))
        .route("/has-permission", post(permissions::check_permission))
        .route(
            "/check-permission",
            post(permissions::check_permission_by_endpoint),
        )
        // Role management
        .route("/role", post(roles::create_role))
        .route("/role/organization", get(roles::list_roles_by_organization))
        .route("/role/system-managed", get(roles::list_system_managed_roles))
        .route("/role/by-name/:role_name", get(roles::get_role_by_name))
        .route("/role/:role_uuid", get(roles::get_role))
        .route("/role/:role_uuid", put(roles::update_role))
        .route("/role/:role_uuid", delete(roles::delete_role))
        // User-role assignments
        .route("/user/:user_uuid/roles", post(user_roles::assign_role))
        .route("/user/:user_uuid/roles", get(user_roles::list_user_roles))
        .route(
            "/user/:user_uuid/roles/:role_uuid",
            delete(user_roles::remove_role),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
