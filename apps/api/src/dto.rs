mod catalog;
mod common;
mod labels;
mod permissions;

pub use catalog::{FeatureActionResponse, FeatureWithActionsResponse};
pub use common::HealthResponse;
pub use labels::{CreateLabelRequest, LabelListQuery, LabelResponse, UpdateLabelRequest};
pub use permissions::{
    CheckPermissionQuery, CheckPermissionResponse, PermissionMatrixActionResponse,
    PermissionMatrixFeatureResponse, PermissionResponse, ProvisionPermissionEntryRequest,
    ProvisionPermissionsRequest, RoleDeletedResponse, RoleKeyQuery, RoleStatusResponse,
    UpdateRoleStatusRequest,
};
