use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, delete, get, post, put};
use outreach_application::{FeatureRequirement, RequestGuard};

use crate::state::AppState;
use crate::{handlers, middleware};

const LABEL_FEATURE: &str = "label";

/// Label routes, each method behind the `label` action it performs.
pub(super) fn label_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/labels",
            guarded(app_state, "read", get(handlers::labels::list_labels_handler)).merge(
                guarded(app_state, "create", post(handlers::labels::create_label_handler)),
            ),
        )
        .route(
            "/api/labels/{label_id}",
            guarded(app_state, "read", get(handlers::labels::get_label_handler))
                .merge(guarded(
                    app_state,
                    "update",
                    put(handlers::labels::update_label_handler),
                ))
                .merge(guarded(
                    app_state,
                    "delete",
                    delete(handlers::labels::delete_label_handler),
                )),
        )
}

fn guarded(
    app_state: &AppState,
    action_key: &str,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    let guard = RequestGuard::new(
        app_state.authorization_service.clone(),
        FeatureRequirement::action(LABEL_FEATURE, action_key),
    );

    route.route_layer(from_fn_with_state(guard, middleware::require_feature))
}
