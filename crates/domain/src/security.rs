use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role's permission set is provisioned.
    SecurityPermissionsProvisioned,
    /// Emitted when a role is activated or deactivated by the identity service.
    SecurityRoleStatusChanged,
    /// Emitted when a role is deleted by the identity service.
    SecurityRoleDeleted,
    /// Emitted when a label is created.
    LabelCreated,
    /// Emitted when a label is updated.
    LabelUpdated,
    /// Emitted when a label is soft-deleted.
    LabelDeleted,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityPermissionsProvisioned => "security.permissions.provisioned",
            Self::SecurityRoleStatusChanged => "security.role.status_changed",
            Self::SecurityRoleDeleted => "security.role.deleted",
            Self::LabelCreated => "label.created",
            Self::LabelUpdated => "label.updated",
            Self::LabelDeleted => "label.deleted",
        }
    }
}
