use outreach_application::FeatureWithActions;
use outreach_domain::FeatureAction;
use serde::Serialize;
use ts_rs::TS;

/// Active feature with its active actions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/feature-with-actions-response.ts"
)]
pub struct FeatureWithActionsResponse {
    pub feature_key: String,
    pub feature_name: String,
    pub actions: Vec<FeatureActionResponse>,
}

/// One active action of a feature.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/feature-action-response.ts"
)]
pub struct FeatureActionResponse {
    pub feature_action_key: String,
    pub action_key: String,
    pub action_name: String,
}

impl From<FeatureAction> for FeatureActionResponse {
    fn from(value: FeatureAction) -> Self {
        Self {
            feature_action_key: value.feature_action_key().to_string(),
            action_key: value.action_key().to_string(),
            action_name: value.action_name().to_string(),
        }
    }
}

impl From<FeatureWithActions> for FeatureWithActionsResponse {
    fn from(value: FeatureWithActions) -> Self {
        Self {
            feature_key: value.feature.key().to_string(),
            feature_name: value.feature.name().to_string(),
            actions: value
                .actions
                .into_iter()
                .map(FeatureActionResponse::from)
                .collect(),
        }
    }
}
