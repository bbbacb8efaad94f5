use outreach_application::{
    PermissionMatrixAction, PermissionMatrixFeature, PermissionRecord, ProvisionPermissionInput,
};

use super::{
    PermissionMatrixActionResponse, PermissionMatrixFeatureResponse, PermissionResponse,
    ProvisionPermissionEntryRequest,
};

impl From<ProvisionPermissionEntryRequest> for ProvisionPermissionInput {
    fn from(value: ProvisionPermissionEntryRequest) -> Self {
        Self {
            feature_key: value.feature_key,
            action_keys: value.action_keys,
        }
    }
}

impl From<PermissionRecord> for PermissionResponse {
    fn from(value: PermissionRecord) -> Self {
        Self {
            action_keys: value.granted_action_keys(),
            unique_id: value.unique_id.as_str().to_owned(),
            role_key: value.role_key,
            branch_key: value.branch_key,
            feature_key: value.feature_key,
            can_be_deleted: value.can_be_deleted,
            is_active: value.is_active,
            is_deleted: value.is_deleted,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<PermissionMatrixAction> for PermissionMatrixActionResponse {
    fn from(value: PermissionMatrixAction) -> Self {
        Self {
            action_key: value.action_key,
            action_name: value.action_name,
            has_permission: value.has_permission,
        }
    }
}

impl From<PermissionMatrixFeature> for PermissionMatrixFeatureResponse {
    fn from(value: PermissionMatrixFeature) -> Self {
        Self {
            feature_key: value.feature_key,
            feature_name: value.feature_name,
            actions: value
                .actions
                .into_iter()
                .map(PermissionMatrixActionResponse::from)
                .collect(),
        }
    }
}
