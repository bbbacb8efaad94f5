use std::sync::Arc;

use outreach_core::{AppError, AppResult};
use outreach_domain::{Feature, FeatureAction};
use tracing::info;

use crate::{FeatureCatalogRepository, FeatureWithActions};

/// Application service for the feature and feature-action catalog.
#[derive(Clone)]
pub struct FeatureCatalogService {
    repository: Arc<dyn FeatureCatalogRepository>,
}

impl FeatureCatalogService {
    /// Creates a new catalog service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn FeatureCatalogRepository>) -> Self {
        Self { repository }
    }

    /// Lists active features.
    pub async fn list_active_features(&self) -> AppResult<Vec<Feature>> {
        self.repository.list_active_features().await
    }

    /// Lists active actions of a known feature.
    pub async fn list_active_actions(&self, feature_key: &str) -> AppResult<Vec<FeatureAction>> {
        self.require_feature(feature_key).await?;
        self.repository.list_active_actions(feature_key).await
    }

    /// Lists every active feature with its active actions.
    pub async fn list_features_with_actions(&self) -> AppResult<Vec<FeatureWithActions>> {
        let features = self.repository.list_active_features().await?;
        let mut listing = Vec::with_capacity(features.len());

        for feature in features {
            let actions = self
                .repository
                .list_active_actions(feature.key().as_str())
                .await?;
            listing.push(FeatureWithActions { feature, actions });
        }

        Ok(listing)
    }

    /// Creates or updates a feature by key.
    pub async fn save_feature(&self, feature: Feature) -> AppResult<Feature> {
        let saved = self.repository.save_feature(feature).await?;
        info!(feature_key = saved.key().as_str(), "feature saved");
        Ok(saved)
    }

    /// Creates or updates a feature action; its feature must exist.
    pub async fn save_feature_action(&self, action: FeatureAction) -> AppResult<FeatureAction> {
        self.require_feature(action.feature_key().as_str()).await?;
        let saved = self.repository.save_feature_action(action).await?;
        info!(
            feature_action_key = saved.feature_action_key().as_str(),
            "feature action saved"
        );
        Ok(saved)
    }

    async fn require_feature(&self, feature_key: &str) -> AppResult<Feature> {
        self.repository
            .find_feature(feature_key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("feature '{feature_key}' not found")))
    }
}
