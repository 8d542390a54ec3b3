use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::api::middleware::{identity, ApiError, ApiResult};
use crate::api::AppState;
use crate::models::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};

pub async fn create_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let user_uuid = identity::user_uuid(&headers)?;
    let organization_uuid = identity::org_uuid(&headers)?;

    let response = state
        .role_service
        .create_role(request, Some(organization_uuid), &user_uuid)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(role_uuid): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    identity::user_uuid(&headers)?;
    identity::org_uuid(&headers)?;

    let response = state.role_service.update_role(&role_uuid, request).await?;
    Ok(Json(response))
}

pub async fn delete_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(role_uuid): Path<String>,
) -> ApiResult<StatusCode> {
    identity::user_uuid(&headers)?;
    identity::org_uuid(&headers)?;

    state.role_service.delete_role(&role_uuid).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_role(
    State(state): State<AppState>,
    Path(role_uuid): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let response = state.role_service.get_role(&role_uuid).await?;
    Ok(Json(response))
}

pub async fn list_roles_by_organization(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let organization_uuid = identity::org_uuid(&headers)?;

    let responses = state
        .role_service
        .list_roles_by_organization(&organization_uuid)
        .await?;
    Ok(Json(responses))
}

pub async fn list_system_managed_roles(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let responses = state.role_service.list_system_managed_roles().await?;
    Ok(Json(responses))
}

pub async fn get_role_by_name(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(role_name): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let organization_uuid = identity::org_uuid(&headers)?;

    let response = state
        .role_service
        .get_role_by_name(&role_name, Some(&organization_uuid))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Role not found: {}", role_name)))?;
    Ok(Json(response))
}
