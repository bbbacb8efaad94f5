use std::sync::Arc;

use outreach_core::{AccessScope, AppResult};

use crate::{
    AuditEvent, AuditRepository, FeatureCatalogRepository, PermissionMatrixAction,
    PermissionMatrixFeature, PermissionRecord, PermissionRepository, ProvisionPermissionInput,
};

mod matrix;
mod provisioning;
mod role_lifecycle;

#[cfg(test)]
mod tests;

const SYSTEM_SUBJECT: &str = "system";

/// Application service for role provisioning and role lifecycle signals.
#[derive(Clone)]
pub struct PermissionAdminService {
    catalog_repository: Arc<dyn FeatureCatalogRepository>,
    permission_repository: Arc<dyn PermissionRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl PermissionAdminService {
    /// Creates a new permission admin service.
    #[must_use]
    pub fn new(
        catalog_repository: Arc<dyn FeatureCatalogRepository>,
        permission_repository: Arc<dyn PermissionRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            catalog_repository,
            permission_repository,
            audit_repository,
        }
    }

    async fn append_audit(
        &self,
        scope: &AccessScope,
        actor: Option<&str>,
        action: outreach_domain::AuditAction,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                branch_key: scope.branch_key().to_owned(),
                subject: actor.unwrap_or(SYSTEM_SUBJECT).to_owned(),
                action,
                resource_type: "role_permissions".to_owned(),
                resource_id: scope.role_key().to_owned(),
                detail: Some(detail),
            })
            .await
    }
}
