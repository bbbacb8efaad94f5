use axum::Json;
use axum::extract::State;

use crate::dto::FeatureWithActionsResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_features_actions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<FeatureWithActionsResponse>>> {
    let features = state
        .feature_catalog_service
        .list_features_with_actions()
        .await?
        .into_iter()
        .map(FeatureWithActionsResponse::from)
        .collect();

    Ok(Json(features))
}
