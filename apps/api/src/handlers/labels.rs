use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use outreach_core::AccessScope;

use crate::dto::{CreateLabelRequest, LabelListQuery, LabelResponse, UpdateLabelRequest};
use crate::error::ApiResult;
use crate::identity::actor;
use crate::state::AppState;

pub async fn list_labels_handler(
    State(state): State<AppState>,
    Extension(scope): Extension<AccessScope>,
    Query(query): Query<LabelListQuery>,
) -> ApiResult<Json<Vec<LabelResponse>>> {
    let labels = state
        .label_service
        .list_labels(&scope, query.status)
        .await?
        .into_iter()
        .map(LabelResponse::from)
        .collect();

    Ok(Json(labels))
}

pub async fn create_label_handler(
    State(state): State<AppState>,
    Extension(scope): Extension<AccessScope>,
    headers: HeaderMap,
    Json(payload): Json<CreateLabelRequest>,
) -> ApiResult<(StatusCode, Json<LabelResponse>)> {
    let label = state
        .label_service
        .create_label(&scope, actor(&headers).as_deref(), payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(LabelResponse::from(label))))
}

pub async fn get_label_handler(
    State(state): State<AppState>,
    Extension(scope): Extension<AccessScope>,
    Path(label_id): Path<i64>,
) -> ApiResult<Json<LabelResponse>> {
    let label = state.label_service.get_label(&scope, label_id).await?;

    Ok(Json(LabelResponse::from(label)))
}

pub async fn update_label_handler(
    State(state): State<AppState>,
    Extension(scope): Extension<AccessScope>,
    Path(label_id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<UpdateLabelRequest>,
) -> ApiResult<Json<LabelResponse>> {
    let label = state
        .label_service
        .update_label(&scope, actor(&headers).as_deref(), label_id, payload.into())
        .await?;

    Ok(Json(LabelResponse::from(label)))
}

pub async fn delete_label_handler(
    State(state): State<AppState>,
    Extension(scope): Extension<AccessScope>,
    Path(label_id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    state
        .label_service
        .delete_label(&scope, actor(&headers).as_deref(), label_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
