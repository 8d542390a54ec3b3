use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::api::middleware::{identity, ApiResult};
use crate::api::AppState;
use crate::models::{
    EndpointPermissionCheckRequest, PermissionCheckRequest, PermissionCheckResponse,
};

// Evaluation never errors past the header check: internal failures come back
// as has_permission = false.

pub async fn check_permission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PermissionCheckRequest>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let user_uuid = identity::user_uuid(&headers)?;
    let organization_uuid = identity::org_uuid(&headers)?;

    let response = state
        .permission_service
        .check_permission(&user_uuid, &organization_uuid, &request)
        .await;
    Ok(Json(response))
}

pub async fn check_permission_by_endpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<EndpointPermissionCheckRequest>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let user_uuid = identity::user_uuid(&headers)?;
    let organization_uuid = identity::org_uuid(&headers)?;

    let response = state
        .permission_service
        .check_permission_by_endpoint(
            &user_uuid,
            &organization_uuid,
            &request.endpoint,
            request.resource_id,
        )
        .await;
    Ok(Json(response))
}
