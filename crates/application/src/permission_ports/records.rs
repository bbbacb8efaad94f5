use outreach_domain::{ActionGrants, PermissionUniqueId};

/// Stored permission row for one (role, branch, feature) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRecord {
    /// Internal numeric identifier.
    pub id: i64,
    /// Externally visible identifier.
    pub unique_id: PermissionUniqueId,
    /// Role key from the identity service.
    pub role_key: String,
    /// Branch the grant applies to.
    pub branch_key: String,
    /// Feature the grant targets.
    pub feature_key: String,
    /// Decoded action grants, `None` when the stored value has an unknown shape.
    pub action_grants: Option<ActionGrants>,
    /// Advisory flag, stored and returned but not enforced.
    pub can_be_deleted: bool,
    /// Active flag.
    pub is_active: bool,
    /// Soft-delete marker.
    pub is_deleted: bool,
    /// Subject that created the row.
    pub created_by: Option<String>,
    /// Subject that last updated the row.
    pub updated_by: Option<String>,
    /// Creation timestamp in RFC3339.
    pub created_at: String,
    /// Last update timestamp in RFC3339.
    pub updated_at: String,
}

impl PermissionRecord {
    /// Returns whether the row grants the action; undecodable rows grant nothing.
    #[must_use]
    pub fn grants(&self, action_key: &str) -> bool {
        self.action_grants
            .as_ref()
            .map(|grants| grants.grants(action_key))
            .unwrap_or(false)
    }

    /// Returns granted action keys, empty for undecodable rows.
    #[must_use]
    pub fn granted_action_keys(&self) -> Vec<String> {
        self.action_grants
            .as_ref()
            .map(ActionGrants::granted_action_keys)
            .unwrap_or_default()
    }
}

/// Result of a store upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertedPermission {
    /// Resulting row.
    pub permission: PermissionRecord,
    /// Whether the row was inserted rather than overwritten.
    pub created: bool,
}
