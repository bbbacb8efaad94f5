use outreach_application::{
    AuthorizationService, FeatureCatalogService, LabelService, PermissionAdminService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub feature_catalog_service: FeatureCatalogService,
    pub permission_admin_service: PermissionAdminService,
    pub label_service: LabelService,
}
