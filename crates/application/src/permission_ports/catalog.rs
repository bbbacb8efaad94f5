use outreach_domain::{Feature, FeatureAction};

/// Active feature paired with its active actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureWithActions {
    /// Feature definition.
    pub feature: Feature,
    /// Active actions of the feature, ordered by action key.
    pub actions: Vec<FeatureAction>,
}
