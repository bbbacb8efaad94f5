use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// `role_key` query parameter of administrative permission endpoints.
#[derive(Debug, Deserialize)]
pub struct RoleKeyQuery {
    pub role_key: Option<String>,
}

/// Query of the permission check endpoint.
#[derive(Debug, Deserialize)]
pub struct CheckPermissionQuery {
    pub feature_key: String,
    pub action_key: Option<String>,
}

/// Incoming provisioning payload replacing a role's grants in one branch.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/provision-permissions-request.ts"
)]
pub struct ProvisionPermissionsRequest {
    pub permissions: Vec<ProvisionPermissionEntryRequest>,
}

/// One feature entry of a provisioning payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/provision-permission-entry-request.ts"
)]
pub struct ProvisionPermissionEntryRequest {
    #[serde(default)]
    pub feature_key: String,
    #[serde(default)]
    pub action_keys: Vec<String>,
}

/// API representation of a stored grant.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub unique_id: String,
    pub role_key: String,
    pub branch_key: String,
    pub feature_key: String,
    pub action_keys: Vec<String>,
    pub can_be_deleted: bool,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// One feature row of the permission matrix.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-matrix-feature-response.ts"
)]
pub struct PermissionMatrixFeatureResponse {
    pub feature_key: String,
    pub feature_name: String,
    pub actions: Vec<PermissionMatrixActionResponse>,
}

/// One action cell of the permission matrix.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-matrix-action-response.ts"
)]
pub struct PermissionMatrixActionResponse {
    pub action_key: String,
    pub action_name: String,
    pub has_permission: bool,
}

/// Result of a permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-permission-response.ts"
)]
pub struct CheckPermissionResponse {
    pub allowed: bool,
}

/// Role activation signal.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-status-request.ts"
)]
pub struct UpdateRoleStatusRequest {
    pub is_active: bool,
}

/// Outcome of a role activation signal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-status-response.ts"
)]
pub struct RoleStatusResponse {
    pub role_key: String,
    pub is_active: bool,
    pub affected_permissions: u64,
}

/// Outcome of a role deletion signal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-deleted-response.ts"
)]
pub struct RoleDeletedResponse {
    pub role_key: String,
    pub deleted_permissions: u64,
}
