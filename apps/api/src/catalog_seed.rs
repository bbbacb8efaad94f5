use outreach_application::FeatureCatalogService;
use outreach_core::AppResult;
use outreach_domain::{Feature, FeatureAction};
use tracing::info;

const DEFAULT_FEATURES: [(&str, &str); 7] = [
    ("label", "Labels"),
    ("audience", "Audiences"),
    ("attribute", "Attributes"),
    ("canned_message", "Canned Messages"),
    ("media_library", "Media Library"),
    ("opt_keyword", "Opt Keywords"),
    ("profile_chat_setting", "Profile Chat Settings"),
];

const DEFAULT_ACTIONS: [(&str, &str); 4] = [
    ("read", "Read"),
    ("create", "Create"),
    ("update", "Update"),
    ("delete", "Delete"),
];

/// Upserts the default feature catalog; safe to run on every start.
pub async fn seed_feature_catalog(catalog: &FeatureCatalogService) -> AppResult<()> {
    for (feature_key, feature_name) in DEFAULT_FEATURES {
        catalog
            .save_feature(Feature::new(feature_key, feature_name, true)?)
            .await?;

        for (action_key, action_name) in DEFAULT_ACTIONS {
            catalog
                .save_feature_action(FeatureAction::new(
                    format!("{feature_key}.{action_key}"),
                    feature_key,
                    action_key,
                    action_name,
                    true,
                )?)
                .await?;
        }
    }

    info!(
        features = DEFAULT_FEATURES.len(),
        actions_per_feature = DEFAULT_ACTIONS.len(),
        "feature catalog seeded"
    );

    Ok(())
}
