use axum::Router;
use axum::routing::{get, patch};
use outreach_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;
mod labels;


pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let admin_routes = Router::new()
        .route(
            "/api/features-actions",
            get(handlers::catalog::list_features_actions_handler),
        )
        .route(
            "/api/permissions",
            get(handlers::permissions::permission_matrix_handler)
                .post(handlers::permissions::provision_permissions_handler),
        )
        .route(
            "/api/permissions/check",
            get(handlers::permissions::check_permission_handler),
        )
        .route(
            "/api/roles/{role_key}/status",
            patch(handlers::roles::update_role_status_handler),
        )
        .route(
            "/api/roles/{role_key}",
            axum::routing::delete(handlers::roles::delete_role_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(admin_routes)
        .merge(labels::label_routes(&app_state))
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
