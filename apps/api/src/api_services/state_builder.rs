use std::sync::Arc;

use outreach_application::{
    AuditRepository, AuthorizationService, FeatureCatalogRepository, FeatureCatalogService,
    LabelRepository, LabelService, PermissionAdminService, PermissionRepository,
};
use outreach_infrastructure::{
    PostgresAuditRepository, PostgresFeatureCatalogRepository, PostgresLabelRepository,
    PostgresPermissionRepository,
};
use sqlx::PgPool;

use crate::state::AppState;

struct RepositorySet {
    catalog_repository: Arc<dyn FeatureCatalogRepository>,
    permission_repository: Arc<dyn PermissionRepository>,
    label_repository: Arc<dyn LabelRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

pub fn build_app_state(pool: PgPool) -> AppState {
    assemble(RepositorySet {
        catalog_repository: Arc::new(PostgresFeatureCatalogRepository::new(pool.clone())),
        permission_repository: Arc::new(PostgresPermissionRepository::new(pool.clone())),
        label_repository: Arc::new(PostgresLabelRepository::new(pool.clone())),
        audit_repository: Arc::new(PostgresAuditRepository::new(pool)),
    })
}

#[cfg(test)]
pub fn build_in_memory_app_state(
    catalog_repository: Arc<dyn FeatureCatalogRepository>,
    permission_repository: Arc<dyn PermissionRepository>,
) -> AppState {
    use outreach_infrastructure::{InMemoryAuditRepository, InMemoryLabelRepository};

    assemble(RepositorySet {
        catalog_repository,
        permission_repository,
        label_repository: Arc::new(InMemoryLabelRepository::new()),
        audit_repository: Arc::new(InMemoryAuditRepository::new()),
    })
}

fn assemble(repositories: RepositorySet) -> AppState {
    AppState {
        authorization_service: AuthorizationService::new(
            repositories.permission_repository.clone(),
        ),
        feature_catalog_service: FeatureCatalogService::new(
            repositories.catalog_repository.clone(),
        ),
        permission_admin_service: PermissionAdminService::new(
            repositories.catalog_repository,
            repositories.permission_repository,
            repositories.audit_repository.clone(),
        ),
        label_service: LabelService::new(
            repositories.label_repository,
            repositories.audit_repository,
        ),
    }
}
