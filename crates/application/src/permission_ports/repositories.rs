use async_trait::async_trait;

use outreach_core::AppResult;
use outreach_domain::{ActionGrants, Feature, FeatureAction};

use super::inputs::PermissionGrantInput;
use super::records::{PermissionRecord, UpsertedPermission};

/// Repository port for the feature and feature-action catalog.
#[async_trait]
pub trait FeatureCatalogRepository: Send + Sync {
    /// Lists active features ordered by key.
    async fn list_active_features(&self) -> AppResult<Vec<Feature>>;

    /// Finds a feature by key regardless of its active flag.
    async fn find_feature(&self, feature_key: &str) -> AppResult<Option<Feature>>;

    /// Lists active actions of one feature ordered by action key.
    async fn list_active_actions(&self, feature_key: &str) -> AppResult<Vec<FeatureAction>>;

    /// Creates or updates a feature by key.
    async fn save_feature(&self, feature: Feature) -> AppResult<Feature>;

    /// Creates or updates a feature action by its global identity.
    async fn save_feature_action(&self, action: FeatureAction) -> AppResult<FeatureAction>;
}

/// Repository port for (role, branch, feature) permission rows.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Lists active, non-deleted rows for the pair, optionally narrowed to one feature.
    async fn find_active(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>>;

    /// Deactivates every row of the pair regardless of feature.
    async fn deactivate_all(&self, role_key: &str, branch_key: &str) -> AppResult<u64>;

    /// Overwrites the row of the triple, reactivating and undeleting it, or inserts a new one.
    async fn upsert(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: ActionGrants,
        actor: Option<&str>,
    ) -> AppResult<UpsertedPermission>;

    /// Deactivates all rows of the pair and upserts the grants as one atomic unit.
    async fn replace_for_scope(
        &self,
        role_key: &str,
        branch_key: &str,
        grants: Vec<PermissionGrantInput>,
        actor: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>>;

    /// Marks the pair's active rows as deleted.
    async fn mark_deleted_for_role(
        &self,
        role_key: &str,
        branch_key: &str,
        actor: Option<&str>,
    ) -> AppResult<u64>;

    /// Sets the active flag on the pair's non-deleted rows.
    async fn mark_active_for_role(
        &self,
        role_key: &str,
        branch_key: &str,
        is_active: bool,
        actor: Option<&str>,
    ) -> AppResult<u64>;
}
