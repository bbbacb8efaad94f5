use axum::http::HeaderMap;
use outreach_core::{AccessScope, AppError};

pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const BRANCH_KEY_HEADER: &str = "x-branch-key";
pub const USER_ID_HEADER: &str = "x-user-id";

/// Returns a header value, treating blank and non-UTF-8 values as absent.
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Subject recorded as `created_by`/`updated_by` and in audit events.
pub fn actor(headers: &HeaderMap) -> Option<String> {
    header_value(headers, USER_ID_HEADER).map(ToOwned::to_owned)
}

/// Scope targeted by an administrative call: `role_key` from the request, branch from the header.
pub fn admin_scope(role_key: Option<&str>, headers: &HeaderMap) -> Result<AccessScope, AppError> {
    let role_key = role_key
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Validation("role_key is required".to_owned()))?;
    let branch_key = header_value(headers, BRANCH_KEY_HEADER)
        .ok_or_else(|| AppError::Validation("X-Branch-Key header is required".to_owned()))?;

    AccessScope::new(role_key, branch_key)
}

/// Scope of the caller itself, from the identity headers.
pub fn caller_scope(headers: &HeaderMap) -> Result<AccessScope, AppError> {
    match (
        header_value(headers, USER_ROLE_HEADER),
        header_value(headers, BRANCH_KEY_HEADER),
    ) {
        (Some(role_key), Some(branch_key)) => AccessScope::new(role_key, branch_key),
        _ => Err(AppError::MissingIdentity(
            "Missing required headers".to_owned(),
        )),
    }
}
