use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::api::middleware::{identity, ApiResult};
use crate::api::AppState;
use crate::models::{UserRoleAssignmentRequest, UserRoleAssignmentResponse};

pub async fn assign_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_uuid): Path<String>,
    Json(request): Json<UserRoleAssignmentRequest>,
) -> ApiResult<(StatusCode, Json<UserRoleAssignmentResponse>)> {
    let assigner_uuid = identity::user_uuid(&headers)?;
    let organization_uuid = identity::org_uuid(&headers)?;

    let response = state
        .user_role_service
        .assign_role(
            &user_uuid,
            &request.role_uuid,
            &organization_uuid,
            &assigner_uuid,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn remove_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_uuid, role_uuid)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let organization_uuid = identity::org_uuid(&headers)?;

    state
        .user_role_service
        .remove_role(&user_uuid, &role_uuid, &organization_uuid)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_user_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_uuid): Path<String>,
) -> ApiResult<Json<Vec<UserRoleAssignmentResponse>>> {
    let organization_uuid = identity::org_uuid(&headers)?;

    let responses = state
        .user_role_service
        .list_user_roles(&user_uuid, &organization_uuid)
        .await?;
    Ok(Json(responses))
}
