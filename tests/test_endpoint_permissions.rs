/// Integration tests for the endpoint-based permission check flow used by
/// the API gateway.
mod helpers;

use helpers::rbac_helpers::{assign, create_customer_role, setup};
use rolegate::models::PermissionCheckRequest;

#[tokio::test]
async fn test_endpoint_check_matches_direct_check() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Task Viewer",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    let by_endpoint = ctx
        .permissions
        .check_permission_by_endpoint("user-1", "org-1", "GET /tasks", None)
        .await;
    let direct = ctx
        .permissions
        .check_permission(
            "user-1",
            "org-1",
            &PermissionCheckRequest {
                action: "view".to_string(),
                resource: "task".to_string(),
                resource_id: None,
            },
        )
        .await;

    assert!(by_endpoint.has_permission);
    assert_eq!(by_endpoint.has_permission, direct.has_permission);
    assert_eq!(by_endpoint.role_uuid, direct.role_uuid);
    assert_eq!(by_endpoint.role_name, direct.role_name);
}

#[tokio::test]
async fn test_endpoint_check_denies_without_grant() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Task Viewer",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    // Maps to (execute, delete_task), which the role does not have.
    let response = ctx
        .permissions
        .check_permission_by_endpoint("user-1", "org-1", "DELETE /tasks/42", None)
        .await;
    assert!(!response.has_permission);
}

#[tokio::test]
async fn test_unknown_endpoint_denies_without_error() {
    let ctx = setup().await;

    let response = ctx
        .permissions
        .check_permission_by_endpoint("user-1", "org-1", "GET /unknown", None)
        .await;

    assert!(!response.has_permission);
    assert!(response.role_uuid.is_none());
}

#[tokio::test]
async fn test_subpath_inherits_broad_prefix_mapping() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "User Viewer",
        "org-1",
        r#"{"data":{"view":["user_basic_info"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    // "GET /users" covers the detail route as well.
    let response = ctx
        .permissions
        .check_permission_by_endpoint("user-1", "org-1", "GET /users/abc-123", None)
        .await;
    assert!(response.has_permission);
}
