use outreach_domain::ActionGrants;

/// One requested entry of a provisioning call, as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPermissionInput {
    /// Feature key the actions belong to.
    pub feature_key: String,
    /// Requested action keys.
    pub action_keys: Vec<String>,
}

/// Validated grant written by the permission store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrantInput {
    /// Feature key the grant targets.
    pub feature_key: String,
    /// Granted actions.
    pub action_grants: ActionGrants,
}
