use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use outreach_application::FeatureCatalogRepository;
use outreach_core::{AppError, AppResult};
use outreach_domain::{Feature, FeatureAction};

/// PostgreSQL-backed feature and feature-action catalog.
#[derive(Clone)]
pub struct PostgresFeatureCatalogRepository {
    pool: PgPool,
}

impl PostgresFeatureCatalogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FeatureRow {
    feature_key: String,
    feature_name: String,
    is_active: bool,
}

impl TryFrom<FeatureRow> for Feature {
    type Error = AppError;

    fn try_from(row: FeatureRow) -> Result<Self, Self::Error> {
        Feature::new(row.feature_key, row.feature_name, row.is_active)
    }
}

#[derive(Debug, FromRow)]
struct FeatureActionRow {
    feature_action_key: String,
    feature_key: String,
    action_key: String,
    action_name: String,
    is_active: bool,
}

impl TryFrom<FeatureActionRow> for FeatureAction {
    type Error = AppError;

    fn try_from(row: FeatureActionRow) -> Result<Self, Self::Error> {
        FeatureAction::new(
            row.feature_action_key,
            row.feature_key,
            row.action_key,
            row.action_name,
            row.is_active,
        )
    }
}

#[async_trait]
impl FeatureCatalogRepository for PostgresFeatureCatalogRepository {
    async fn list_active_features(&self) -> AppResult<Vec<Feature>> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            r#"
            SELECT feature_key, feature_name, is_active
            FROM features
            WHERE is_active
            ORDER BY feature_key
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list features: {error}")))?;

        rows.into_iter().map(Feature::try_from).collect()
    }

    async fn find_feature(&self, feature_key: &str) -> AppResult<Option<Feature>> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            SELECT feature_key, feature_name, is_active
            FROM features
            WHERE feature_key = $1
            "#,
        )
        .bind(feature_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find feature '{feature_key}': {error}"))
        })?;

        row.map(Feature::try_from).transpose()
    }

    async fn list_active_actions(&self, feature_key: &str) -> AppResult<Vec<FeatureAction>> {
        let rows = sqlx::query_as::<_, FeatureActionRow>(
            r#"
            SELECT feature_action_key, feature_key, action_key, action_name, is_active
            FROM feature_actions
            WHERE feature_key = $1
              AND is_active
            ORDER BY action_key
            "#,
        )
        .bind(feature_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list actions for feature '{feature_key}': {error}"
            ))
        })?;

        rows.into_iter().map(FeatureAction::try_from).collect()
    }

    async fn save_feature(&self, feature: Feature) -> AppResult<Feature> {
        let row = sqlx::query_as::<_, FeatureRow>(
            r#"
            INSERT INTO features (feature_key, feature_name, is_active)
            VALUES ($1, $2, $3)
            ON CONFLICT (feature_key)
            DO UPDATE
            SET feature_name = EXCLUDED.feature_name,
                is_active = EXCLUDED.is_active,
                updated_at = now()
            RETURNING feature_key, feature_name, is_active
            "#,
        )
        .bind(feature.key().as_str())
        .bind(feature.name().as_str())
        .bind(feature.is_active())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save feature '{}': {error}",
                feature.key()
            ))
        })?;

        Feature::try_from(row)
    }

    async fn save_feature_action(&self, action: FeatureAction) -> AppResult<FeatureAction> {
        let row = sqlx::query_as::<_, FeatureActionRow>(
            r#"
            INSERT INTO feature_actions (
                feature_action_key,
                feature_key,
                action_key,
                action_name,
                is_active
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (feature_action_key)
            DO UPDATE
            SET action_name = EXCLUDED.action_name,
                is_active = EXCLUDED.is_active,
                updated_at = now()
            RETURNING feature_action_key, feature_key, action_key, action_name, is_active
            "#,
        )
        .bind(action.feature_action_key().as_str())
        .bind(action.feature_key().as_str())
        .bind(action.action_key().as_str())
        .bind(action.action_name().as_str())
        .bind(action.is_active())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Conflict(format!(
                    "action '{}' already exists for feature '{}'",
                    action.action_key(),
                    action.feature_key()
                ));
            }
            AppError::Internal(format!(
                "failed to save feature action '{}': {error}",
                action.feature_action_key()
            ))
        })?;

        FeatureAction::try_from(row)
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(database_error) if database_error.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use outreach_application::FeatureCatalogRepository;
    use outreach_domain::{Feature, FeatureAction};

    use super::PostgresFeatureCatalogRepository;
    use crate::postgres_test_support::{test_pool, unique_key};

    #[tokio::test]
    async fn saved_catalog_is_listed_with_active_actions_only() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresFeatureCatalogRepository::new(pool);
        let feature_key = unique_key("feature");
        let feature = Feature::new(feature_key.as_str(), "Contacts", true)
            .unwrap_or_else(|_| unreachable!());
        assert!(repository.save_feature(feature).await.is_ok());

        for (action_key, is_active) in [("read", true), ("write", true), ("purge", false)] {
            let action = FeatureAction::new(
                format!("{feature_key}.{action_key}"),
                feature_key.as_str(),
                action_key,
                action_key.to_uppercase(),
                is_active,
            )
            .unwrap_or_else(|_| unreachable!());
            assert!(repository.save_feature_action(action).await.is_ok());
        }

        let actions = repository
            .list_active_actions(feature_key.as_str())
            .await
            .unwrap_or_default();
        let keys: Vec<&str> = actions
            .iter()
            .map(|action| action.action_key().as_str())
            .collect();
        assert_eq!(keys, vec!["read", "write"]);

        let features = repository.list_active_features().await.unwrap_or_default();
        assert!(
            features
                .iter()
                .any(|feature| feature.key().as_str() == feature_key)
        );
    }

    #[tokio::test]
    async fn duplicate_action_key_within_feature_is_conflict() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresFeatureCatalogRepository::new(pool);
        let feature_key = unique_key("feature");
        let feature = Feature::new(feature_key.as_str(), "Reports", true)
            .unwrap_or_else(|_| unreachable!());
        assert!(repository.save_feature(feature).await.is_ok());

        let first = FeatureAction::new(
            format!("{feature_key}.read"),
            feature_key.as_str(),
            "read",
            "Read",
            true,
        )
        .unwrap_or_else(|_| unreachable!());
        let second = FeatureAction::new(
            format!("{feature_key}.read-again"),
            feature_key.as_str(),
            "read",
            "Read again",
            true,
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(repository.save_feature_action(first).await.is_ok());
        let result = repository.save_feature_action(second).await;
        assert!(matches!(result, Err(outreach_core::AppError::Conflict(_))));
    }
}
