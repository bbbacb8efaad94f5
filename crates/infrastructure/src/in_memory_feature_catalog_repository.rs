use std::collections::HashMap;

use async_trait::async_trait;
use outreach_application::FeatureCatalogRepository;
use outreach_core::{AppError, AppResult};
use outreach_domain::{Feature, FeatureAction};
use tokio::sync::RwLock;

/// In-memory feature catalog used by tests and database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryFeatureCatalogRepository {
    features: RwLock<HashMap<String, Feature>>,
    actions: RwLock<HashMap<String, FeatureAction>>,
}

impl InMemoryFeatureCatalogRepository {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeatureCatalogRepository for InMemoryFeatureCatalogRepository {
    async fn list_active_features(&self) -> AppResult<Vec<Feature>> {
        let mut features: Vec<Feature> = self
            .features
            .read()
            .await
            .values()
            .filter(|feature| feature.is_active())
            .cloned()
            .collect();
        features.sort_by(|left, right| left.key().cmp(right.key()));

        Ok(features)
    }

    async fn find_feature(&self, feature_key: &str) -> AppResult<Option<Feature>> {
        Ok(self.features.read().await.get(feature_key).cloned())
    }

    async fn list_active_actions(&self, feature_key: &str) -> AppResult<Vec<FeatureAction>> {
        let mut actions: Vec<FeatureAction> = self
            .actions
            .read()
            .await
            .values()
            .filter(|action| action.feature_key().as_str() == feature_key && action.is_active())
            .cloned()
            .collect();
        actions.sort_by(|left, right| left.action_key().cmp(right.action_key()));

        Ok(actions)
    }

    async fn save_feature(&self, feature: Feature) -> AppResult<Feature> {
        self.features
            .write()
            .await
            .insert(feature.key().as_str().to_owned(), feature.clone());

        Ok(feature)
    }

    async fn save_feature_action(&self, action: FeatureAction) -> AppResult<FeatureAction> {
        let mut actions = self.actions.write().await;

        let taken = actions.values().any(|existing| {
            existing.feature_key() == action.feature_key()
                && existing.action_key() == action.action_key()
                && existing.feature_action_key() != action.feature_action_key()
        });
        if taken {
            return Err(AppError::Conflict(format!(
                "action '{}' already exists for feature '{}'",
                action.action_key(),
                action.feature_key()
            )));
        }

        actions.insert(
            action.feature_action_key().as_str().to_owned(),
            action.clone(),
        );

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use outreach_application::FeatureCatalogRepository;
    use outreach_core::AppError;
    use outreach_domain::{Feature, FeatureAction};

    use super::InMemoryFeatureCatalogRepository;

    #[tokio::test]
    async fn features_may_share_action_keys() {
        let repository = InMemoryFeatureCatalogRepository::new();
        for feature_key in ["label", "audience"] {
            let feature =
                Feature::new(feature_key, feature_key, true).unwrap_or_else(|_| unreachable!());
            assert!(repository.save_feature(feature).await.is_ok());
            let action = FeatureAction::new(
                format!("{feature_key}.read"),
                feature_key,
                "read",
                "Read",
                true,
            )
            .unwrap_or_else(|_| unreachable!());
            assert!(repository.save_feature_action(action).await.is_ok());
        }

        let label_actions = repository
            .list_active_actions("label")
            .await
            .unwrap_or_default();
        assert_eq!(label_actions.len(), 1);
        let features = repository.list_active_features().await.unwrap_or_default();
        let keys: Vec<&str> = features.iter().map(|feature| feature.key().as_str()).collect();
        assert_eq!(keys, vec!["audience", "label"]);
    }

    #[tokio::test]
    async fn second_identity_for_same_action_key_conflicts() {
        let repository = InMemoryFeatureCatalogRepository::new();
        let first = FeatureAction::new("label.read", "label", "read", "Read", true)
            .unwrap_or_else(|_| unreachable!());
        let second = FeatureAction::new("label.view", "label", "read", "View", true)
            .unwrap_or_else(|_| unreachable!());

        assert!(repository.save_feature_action(first).await.is_ok());
        let result = repository.save_feature_action(second).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
