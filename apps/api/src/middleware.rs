use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use outreach_application::RequestGuard;

use crate::error::ApiResult;
use crate::identity::{BRANCH_KEY_HEADER, USER_ROLE_HEADER, header_value};

/// Rejects the request unless the identity headers pass the guard's requirement.
///
/// On success the resolved `AccessScope` is placed in the request extensions.
pub async fn require_feature(
    State(guard): State<RequestGuard>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let scope = {
        let headers = request.headers();
        guard
            .authorize(
                header_value(headers, USER_ROLE_HEADER),
                header_value(headers, BRANCH_KEY_HEADER),
            )
            .await?
    };

    request.extensions_mut().insert(scope);
    Ok(next.run(request).await)
}
