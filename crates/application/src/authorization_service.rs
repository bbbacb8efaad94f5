use std::sync::Arc;

use outreach_core::{AccessScope, AppError, AppResult};
use tracing::warn;

use crate::PermissionRepository;

mod evaluation;


/// Outcome of evaluating one permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    /// The active grant allows the request.
    Granted,
    /// The request is denied.
    Denied(DenialReason),
}

impl PermissionDecision {
    /// Returns whether the decision allows the request.
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Reason a permission check denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No active, non-deleted grant exists for the feature.
    NoGrant,
    /// A grant exists but does not include the action.
    ActionNotGranted,
    /// The stored action set has an unknown shape.
    MalformedGrant,
}

/// Application service answering feature-action permission checks.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn PermissionRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionRepository>) -> Self {
        Self { repository }
    }

    /// Returns whether the scope may perform the action on the feature.
    ///
    /// Never fails: lookup errors and malformed stored grants resolve to `false`.
    pub async fn has_permission(
        &self,
        scope: &AccessScope,
        feature_key: &str,
        action_key: Option<&str>,
    ) -> bool {
        match self.evaluate(scope, feature_key, action_key).await {
            Ok(decision) => decision.is_granted(),
            Err(error) => {
                warn!(
                    role_key = scope.role_key(),
                    branch_key = scope.branch_key(),
                    feature_key,
                    %error,
                    "permission lookup failed, denying"
                );
                false
            }
        }
    }

    /// Ensures the scope holds the feature action.
    pub async fn require_permission(
        &self,
        scope: &AccessScope,
        feature_key: &str,
        action_key: Option<&str>,
    ) -> AppResult<()> {
        match self.evaluate(scope, feature_key, action_key).await? {
            PermissionDecision::Granted => Ok(()),
            PermissionDecision::Denied(_) => Err(AppError::PermissionDenied(format!(
                "role '{}' in branch '{}' may not perform '{}' on feature '{feature_key}'",
                scope.role_key(),
                scope.branch_key(),
                action_key.unwrap_or("*"),
            ))),
        }
    }
}
