use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use outreach_core::AppError;
use tower_http::cors::CorsLayer;

use crate::identity::{BRANCH_KEY_HEADER, USER_ID_HEADER, USER_ROLE_HEADER};

pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderName::from_static(BRANCH_KEY_HEADER),
            HeaderName::from_static(USER_ID_HEADER),
        ]))
}
