use std::future::Future;

use outreach_core::{AccessScope, AppError, AppResult};
use tracing::{debug, error};

use crate::{AuthorizationService, PermissionDecision};

/// Feature and optional action a guarded operation requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRequirement {
    feature_key: String,
    action_key: Option<String>,
}

impl FeatureRequirement {
    /// Requires a specific action on a feature.
    #[must_use]
    pub fn action(feature_key: impl Into<String>, action_key: impl Into<String>) -> Self {
        Self {
            feature_key: feature_key.into(),
            action_key: Some(action_key.into()),
        }
    }

    /// Requires any active grant on the feature.
    #[must_use]
    pub fn feature(feature_key: impl Into<String>) -> Self {
        Self {
            feature_key: feature_key.into(),
            action_key: None,
        }
    }

    /// Returns the required feature key.
    #[must_use]
    pub fn feature_key(&self) -> &str {
        self.feature_key.as_str()
    }

    /// Returns the required action key, if any.
    #[must_use]
    pub fn action_key(&self) -> Option<&str> {
        self.action_key.as_deref()
    }
}

/// Runs operations only after the caller's role and branch pass a permission check.
#[derive(Clone)]
pub struct RequestGuard {
    authorization_service: AuthorizationService,
    requirement: FeatureRequirement,
}

impl RequestGuard {
    /// Creates a guard enforcing one requirement.
    #[must_use]
    pub fn new(authorization_service: AuthorizationService, requirement: FeatureRequirement) -> Self {
        Self {
            authorization_service,
            requirement,
        }
    }

    /// Returns the enforced requirement.
    #[must_use]
    pub fn requirement(&self) -> &FeatureRequirement {
        &self.requirement
    }

    /// Resolves the identity tokens and checks the requirement.
    ///
    /// Missing tokens fail with [`AppError::MissingIdentity`] before any lookup,
    /// a denial with [`AppError::PermissionDenied`], and a failed lookup with
    /// [`AppError::Internal`].
    pub async fn authorize(
        &self,
        role_key: Option<&str>,
        branch_key: Option<&str>,
    ) -> AppResult<AccessScope> {
        let (Some(role_key), Some(branch_key)) = (non_blank(role_key), non_blank(branch_key))
        else {
            return Err(AppError::MissingIdentity(
                "Missing required headers".to_owned(),
            ));
        };

        let scope = AccessScope::new(role_key, branch_key)
            .map_err(|_| AppError::MissingIdentity("Missing required headers".to_owned()))?;

        let decision = self
            .authorization_service
            .evaluate(
                &scope,
                self.requirement.feature_key(),
                self.requirement.action_key(),
            )
            .await
            .map_err(|failure| {
                error!(%scope, feature_key = self.requirement.feature_key(), error = %failure, "permission check failed");
                AppError::Internal("permission check failed".to_owned())
            })?;

        match decision {
            PermissionDecision::Granted => Ok(scope),
            PermissionDecision::Denied(reason) => {
                debug!(%scope, feature_key = self.requirement.feature_key(), ?reason, "permission denied");
                Err(AppError::PermissionDenied("Permission denied".to_owned()))
            }
        }
    }

    /// Authorizes and then runs the operation, returning its result unchanged.
    ///
    /// The operation is never started when authorization fails.
    pub async fn run<T, F, Fut>(
        &self,
        role_key: Option<&str>,
        branch_key: Option<&str>,
        operation: F,
    ) -> AppResult<T>
    where
        F: FnOnce(AccessScope) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let scope = self.authorize(role_key, branch_key).await?;
        operation(scope).await
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
