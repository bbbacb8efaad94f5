use std::collections::BTreeSet;

use outreach_core::AppError;
use outreach_domain::{ActionGrants, AuditAction};
use tracing::info;

use super::*;

use crate::PermissionGrantInput;

impl PermissionAdminService {
    /// Replaces the complete grant set of the scope's role and branch.
    ///
    /// Every entry is validated before anything is written; the first failure
    /// rejects the whole call and leaves existing grants untouched. An empty
    /// request deactivates every grant of the pair.
    pub async fn provision(
        &self,
        scope: &AccessScope,
        actor: Option<&str>,
        requested: Vec<ProvisionPermissionInput>,
    ) -> AppResult<Vec<PermissionRecord>> {
        let grants = self.validate_request(requested).await?;
        let feature_keys: Vec<String> = grants
            .iter()
            .map(|grant| grant.feature_key.clone())
            .collect();

        let permissions = self
            .permission_repository
            .replace_for_scope(scope.role_key(), scope.branch_key(), grants, actor)
            .await?;

        info!(%scope, features = permissions.len(), "permissions provisioned");

        self.append_audit(
            scope,
            actor,
            AuditAction::SecurityPermissionsProvisioned,
            format!("provisioned features [{}]", feature_keys.join(", ")),
        )
        .await?;

        Ok(permissions)
    }

    async fn validate_request(
        &self,
        requested: Vec<ProvisionPermissionInput>,
    ) -> AppResult<Vec<PermissionGrantInput>> {
        let mut seen_features = BTreeSet::new();
        let mut grants = Vec::with_capacity(requested.len());

        for entry in requested {
            let feature_key = entry.feature_key.trim();
            if feature_key.is_empty() {
                return Err(AppError::Validation("missing feature_key".to_owned()));
            }
            if entry.action_keys.is_empty() {
                return Err(AppError::Validation(format!(
                    "missing action_keys for feature '{feature_key}'"
                )));
            }
            if !seen_features.insert(feature_key.to_owned()) {
                return Err(AppError::Validation(format!(
                    "feature '{feature_key}' is listed more than once"
                )));
            }

            if self
                .catalog_repository
                .find_feature(feature_key)
                .await?
                .is_none()
            {
                return Err(AppError::Validation(format!(
                    "feature '{feature_key}' not found"
                )));
            }

            let valid_action_keys: BTreeSet<String> = self
                .catalog_repository
                .list_active_actions(feature_key)
                .await?
                .into_iter()
                .map(|action| String::from(action.action_key().clone()))
                .collect();

            let invalid_action_keys: BTreeSet<&str> = entry
                .action_keys
                .iter()
                .map(String::as_str)
                .filter(|action_key| !valid_action_keys.contains(*action_key))
                .collect();
            if !invalid_action_keys.is_empty() {
                return Err(AppError::Validation(format!(
                    "invalid actions for feature '{feature_key}': {}",
                    invalid_action_keys
                        .into_iter()
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }

            grants.push(PermissionGrantInput {
                feature_key: feature_key.to_owned(),
                action_grants: ActionGrants::from_action_keys(entry.action_keys.iter().cloned()),
            });
        }

        Ok(grants)
    }
}
