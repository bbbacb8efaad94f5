use outreach_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// A guardable capability area such as `label` or `audience`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    key: NonEmptyString,
    name: NonEmptyString,
    is_active: bool,
}

impl Feature {
    /// Creates a feature with validated key and display name.
    pub fn new(key: impl Into<String>, name: impl Into<String>, is_active: bool) -> AppResult<Self> {
        Ok(Self {
            key: NonEmptyString::new(key)?,
            name: NonEmptyString::new(name)?,
            is_active,
        })
    }

    /// Returns the stable feature key referenced by grants.
    #[must_use]
    pub fn key(&self) -> &NonEmptyString {
        &self.key
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns whether the feature is offered for provisioning.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// An operation offered by one feature.
///
/// `feature_action_key` is the globally unique identity of the row while
/// `action_key` is the short key stored in grants (`read`, `create`, ...),
/// unique within its feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAction {
    feature_action_key: NonEmptyString,
    feature_key: NonEmptyString,
    action_key: NonEmptyString,
    action_name: NonEmptyString,
    is_active: bool,
}

impl FeatureAction {
    /// Creates a feature action with validated identifiers.
    pub fn new(
        feature_action_key: impl Into<String>,
        feature_key: impl Into<String>,
        action_key: impl Into<String>,
        action_name: impl Into<String>,
        is_active: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            feature_action_key: NonEmptyString::new(feature_action_key)?,
            feature_key: NonEmptyString::new(feature_key)?,
            action_key: NonEmptyString::new(action_key)?,
            action_name: NonEmptyString::new(action_name)?,
            is_active,
        })
    }

    /// Returns the globally unique action identity.
    #[must_use]
    pub fn feature_action_key(&self) -> &NonEmptyString {
        &self.feature_action_key
    }

    /// Returns the owning feature key.
    #[must_use]
    pub fn feature_key(&self) -> &NonEmptyString {
        &self.feature_key
    }

    /// Returns the action key stored in permission grants.
    #[must_use]
    pub fn action_key(&self) -> &NonEmptyString {
        &self.action_key
    }

    /// Returns the human-readable action label.
    #[must_use]
    pub fn action_name(&self) -> &NonEmptyString {
        &self.action_name
    }

    /// Returns whether the action may be granted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::{Feature, FeatureAction};

    #[test]
    fn feature_requires_key_and_name() {
        assert!(Feature::new("", "Labels", true).is_err());
        assert!(Feature::new("label", " ", true).is_err());
        assert!(Feature::new("label", "Labels", true).is_ok());
    }

    #[test]
    fn feature_action_keeps_identity_separate_from_action_key() {
        let action = FeatureAction::new("label.read", "label", "read", "Read", true);
        assert!(action.is_ok());
        let action = action.unwrap_or_else(|_| unreachable!());
        assert_eq!(action.feature_action_key().as_str(), "label.read");
        assert_eq!(action.action_key().as_str(), "read");
    }
}
