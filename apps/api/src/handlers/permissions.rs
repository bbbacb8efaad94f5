use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use outreach_application::ProvisionPermissionInput;

use crate::dto::{
    CheckPermissionQuery, CheckPermissionResponse, PermissionMatrixFeatureResponse,
    PermissionResponse, ProvisionPermissionsRequest, RoleKeyQuery,
};
use crate::error::ApiResult;
use crate::identity::{actor, admin_scope, caller_scope};
use crate::state::AppState;

pub async fn permission_matrix_handler(
    State(state): State<AppState>,
    Query(query): Query<RoleKeyQuery>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<PermissionMatrixFeatureResponse>>> {
    let scope = admin_scope(query.role_key.as_deref(), &headers)?;
    let matrix = state
        .permission_admin_service
        .permission_matrix(&scope)
        .await?
        .into_iter()
        .map(PermissionMatrixFeatureResponse::from)
        .collect();

    Ok(Json(matrix))
}

pub async fn provision_permissions_handler(
    State(state): State<AppState>,
    Query(query): Query<RoleKeyQuery>,
    headers: HeaderMap,
    Json(payload): Json<ProvisionPermissionsRequest>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let scope = admin_scope(query.role_key.as_deref(), &headers)?;
    let actor = actor(&headers);
    let requested = payload
        .permissions
        .into_iter()
        .map(ProvisionPermissionInput::from)
        .collect();

    let permissions = state
        .permission_admin_service
        .provision(&scope, actor.as_deref(), requested)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn check_permission_handler(
    State(state): State<AppState>,
    Query(query): Query<CheckPermissionQuery>,
    headers: HeaderMap,
) -> ApiResult<Json<CheckPermissionResponse>> {
    let scope = caller_scope(&headers)?;
    let allowed = state
        .authorization_service
        .has_permission(
            &scope,
            query.feature_key.as_str(),
            query.action_key.as_deref(),
        )
        .await;

    Ok(Json(CheckPermissionResponse { allowed }))
}
