/// One feature row of a role's permission matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrixFeature {
    /// Feature key.
    pub feature_key: String,
    /// Feature display name.
    pub feature_name: String,
    /// Active actions with their grant state.
    pub actions: Vec<PermissionMatrixAction>,
}

/// Grant state of one action in the permission matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrixAction {
    /// Action key.
    pub action_key: String,
    /// Action display name.
    pub action_name: String,
    /// Whether the role currently holds the action in the branch.
    pub has_permission: bool,
}
