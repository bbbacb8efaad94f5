use tracing::{debug, warn};

use super::*;

impl AuthorizationService {
    /// Evaluates a permission check, propagating storage failures.
    ///
    /// Malformed stored grants are a denial, not an error.
    pub async fn evaluate(
        &self,
        scope: &AccessScope,
        feature_key: &str,
        action_key: Option<&str>,
    ) -> AppResult<PermissionDecision> {
        let permissions = self
            .repository
            .find_active(scope.role_key(), scope.branch_key(), Some(feature_key))
            .await?;

        let Some(permission) = permissions.first() else {
            debug!(%scope, feature_key, "no active grant for feature");
            return Ok(PermissionDecision::Denied(DenialReason::NoGrant));
        };

        let Some(action_key) = action_key else {
            return Ok(PermissionDecision::Granted);
        };

        let Some(action_grants) = permission.action_grants.as_ref() else {
            warn!(
                unique_id = permission.unique_id.as_str(),
                feature_key, "stored action grants have an unknown shape, denying"
            );
            return Ok(PermissionDecision::Denied(DenialReason::MalformedGrant));
        };

        if action_grants.grants(action_key) {
            Ok(PermissionDecision::Granted)
        } else {
            Ok(PermissionDecision::Denied(DenialReason::ActionNotGranted))
        }
    }
}
