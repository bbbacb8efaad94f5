use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;

use crate::dto::{RoleDeletedResponse, RoleStatusResponse, UpdateRoleStatusRequest};
use crate::error::ApiResult;
use crate::identity::{actor, admin_scope};
use crate::state::AppState;

pub async fn update_role_status_handler(
    State(state): State<AppState>,
    Path(role_key): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateRoleStatusRequest>,
) -> ApiResult<Json<RoleStatusResponse>> {
    let scope = admin_scope(Some(role_key.as_str()), &headers)?;
    let affected_permissions = state
        .permission_admin_service
        .set_role_active(&scope, actor(&headers).as_deref(), payload.is_active)
        .await?;

    Ok(Json(RoleStatusResponse {
        role_key: scope.role_key().to_owned(),
        is_active: payload.is_active,
        affected_permissions,
    }))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Path(role_key): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<RoleDeletedResponse>> {
    let scope = admin_scope(Some(role_key.as_str()), &headers)?;
    let deleted_permissions = state
        .permission_admin_service
        .delete_role(&scope, actor(&headers).as_deref())
        .await?;

    Ok(Json(RoleDeletedResponse {
        role_key: scope.role_key().to_owned(),
        deleted_permissions,
    }))
}
