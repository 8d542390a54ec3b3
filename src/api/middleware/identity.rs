use axum::http::HeaderMap;

use super::error::ApiError;

/// Trusted identity headers set by the platform gateway.
pub const APP_USER_UUID_HEADER: &str = "x-app-user-uuid";
pub const APP_ORG_UUID_HEADER: &str = "x-app-org-uuid";

fn require_header(headers: &HeaderMap, name: &str) -> Result<String, ApiError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required header: {}", name)))
}

pub fn user_uuid(headers: &HeaderMap) -> Result<String, ApiError> {
    require_header(headers, APP_USER_UUID_HEADER)
}

pub fn org_uuid(headers: &HeaderMap) -> Result<String, ApiError> {
    require_header(headers, APP_ORG_UUID_HEADER)
}
