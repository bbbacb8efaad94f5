//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod feature_catalog_service;
mod label_ports;
mod label_service;
mod permission_admin_service;
mod permission_ports;
mod request_guard;

#[cfg(test)]
mod test_support;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::{AuthorizationService, DenialReason, PermissionDecision};
pub use feature_catalog_service::FeatureCatalogService;
pub use label_ports::{
    CreateLabelInput, LabelChanges, LabelRecord, LabelRepository, NewLabel, UpdateLabelInput,
};
pub use label_service::LabelService;
pub use permission_admin_service::PermissionAdminService;
pub use permission_ports::{
    FeatureCatalogRepository, FeatureWithActions, PermissionGrantInput, PermissionMatrixAction,
    PermissionMatrixFeature, PermissionRecord, PermissionRepository, ProvisionPermissionInput,
    UpsertedPermission,
};
pub use request_guard::{FeatureRequirement, RequestGuard};
