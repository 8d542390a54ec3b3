/// Integration tests for the permission evaluator: deny-by-default,
/// first-match grants, fail-closed handling of broken bindings.
mod helpers;

use helpers::rbac_helpers::{assign, create_customer_role, create_system_role, setup};
use rolegate::domain::ports::PermissionCache;
use rolegate::models::PermissionCheckRequest;

fn request(action: &str, resource: &str) -> PermissionCheckRequest {
    PermissionCheckRequest {
        action: action.to_string(),
        resource: resource.to_string(),
        resource_id: None,
    }
}

#[tokio::test]
async fn test_deny_by_default_without_bindings() {
    let ctx = setup().await;

    let response = ctx
        .permissions
        .check_permission("user-1", "org-1", &request("view", "task"))
        .await;

    assert!(!response.has_permission);
    assert!(response.role_uuid.is_none());
    assert!(response.role_name.is_none());
    assert!(response.granted_scope.is_none());
}

#[tokio::test]
async fn test_allow_on_match_carries_granting_role() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Task Viewer",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    let response = ctx
        .permissions
        .check_permission("user-1", "org-1", &request("view", "task"))
        .await;

    assert!(response.has_permission);
    assert_eq!(response.role_uuid.as_deref(), Some(role.role_uuid.as_str()));
    assert_eq!(response.role_name.as_deref(), Some("Task Viewer"));
    assert_eq!(response.granted_scope.as_deref(), Some("team"));
}

#[tokio::test]
async fn test_deny_for_unlisted_action_or_resource() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Task Viewer",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    assert!(
        !ctx.permissions
            .check_permission("user-1", "org-1", &request("edit", "task"))
            .await
            .has_permission
    );
    assert!(
        !ctx.permissions
            .check_permission("user-1", "org-1", &request("view", "client"))
            .await
            .has_permission
    );
}

#[tokio::test]
async fn test_bindings_are_scoped_to_the_organization() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Task Viewer",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    // Same user, different organization: no bindings, deny.
    let response = ctx
        .permissions
        .check_permission("user-1", "org-2", &request("view", "task"))
        .await;
    assert!(!response.has_permission);
}

#[tokio::test]
async fn test_features_section_grants_too() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Reporter",
        "org-1",
        r#"{"data":{},"features":{"execute":["generate_reports"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    let response = ctx
        .permissions
        .check_permission("user-1", "org-1", &request("execute", "generate_reports"))
        .await;
    assert!(response.has_permission);
}

#[tokio::test]
async fn test_any_role_in_the_set_can_grant() {
    let ctx = setup().await;
    let viewer = create_customer_role(
        &ctx,
        "Task Viewer",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    let editor = create_customer_role(
        &ctx,
        "Client Editor",
        "org-1",
        r#"{"data":{"edit":["client"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &viewer.role_uuid, "org-1").await;
    assign(&ctx, "user-1", &editor.role_uuid, "org-1").await;

    let response = ctx
        .permissions
        .check_permission("user-1", "org-1", &request("edit", "client"))
        .await;
    assert!(response.has_permission);
    assert_eq!(response.role_name.as_deref(), Some("Client Editor"));
}

#[tokio::test]
async fn test_wildcard_entries_do_not_expand() {
    // Seeded roles carry "*" allow-lists; evaluation is exact match, so a
    // wildcard grants nothing but the literal "*" resource. Documented
    // current behavior, preserved on purpose.
    let ctx = setup().await;
    let owner = create_system_role(
        &ctx,
        "Owner",
        r#"{"data":{"view":["*"],"edit":["*"]},"features":{"execute":["*"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &owner.role_uuid, "org-1").await;

    assert!(
        !ctx.permissions
            .check_permission("user-1", "org-1", &request("view", "task"))
            .await
            .has_permission
    );
    assert!(
        ctx.permissions
            .check_permission("user-1", "org-1", &request("view", "*"))
            .await
            .has_permission
    );
}

#[tokio::test]
async fn test_dangling_binding_is_skipped() {
    let ctx = setup().await;
    let doomed = create_customer_role(
        &ctx,
        "Doomed",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    let keeper = create_customer_role(
        &ctx,
        "Keeper",
        "org-1",
        r#"{"data":{"view":["client"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &doomed.role_uuid, "org-1").await;
    assign(&ctx, "user-1", &keeper.role_uuid, "org-1").await;

    // Deleting a role does not cascade to its bindings; the evaluator must
    // skip the dangling one and keep going.
    ctx.roles.delete_role(&doomed.role_uuid).await.unwrap();

    assert!(
        !ctx.permissions
            .check_permission("user-1", "org-1", &request("view", "task"))
            .await
            .has_permission
    );
    assert!(
        ctx.permissions
            .check_permission("user-1", "org-1", &request("view", "client"))
            .await
            .has_permission
    );
}

#[tokio::test]
async fn test_malformed_stored_policy_fails_closed() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Corrupted",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    // Corrupt the stored policy behind the service's back.
    sqlx::query("UPDATE roles SET policy = '{broken' WHERE role_uuid = ?")
        .bind(&role.role_uuid)
        .execute(ctx.db.pool())
        .await
        .unwrap();
    ctx.cache.invalidate_all("permissions");

    let response = ctx
        .permissions
        .check_permission("user-1", "org-1", &request("view", "task"))
        .await;
    assert!(!response.has_permission);
}

#[tokio::test]
async fn test_revocation_removes_access() {
    let ctx = setup().await;
    let role = create_customer_role(
        &ctx,
        "Task Viewer",
        "org-1",
        r#"{"data":{"view":["task"]}}"#,
    )
    .await;
    assign(&ctx, "user-1", &role.role_uuid, "org-1").await;

    assert!(
        ctx.permissions
            .check_permission("user-1", "org-1", &request("view", "task"))
            .await
            .has_permission
    );

    ctx.user_roles
        .remove_role("user-1", &role.role_uuid, "org-1")
        .await
        .unwrap();

    let listed = ctx.user_roles.list_user_roles("user-1", "org-1").await.unwrap();
    assert!(listed.iter().all(|b| b.role_uuid != role.role_uuid));

    assert!(
        !ctx.permissions
            .check_permission("user-1", "org-1", &request("view", "task"))
            .await
            .has_permission
    );
}
