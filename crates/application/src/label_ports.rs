use async_trait::async_trait;

use outreach_core::AppResult;
use outreach_domain::LabelName;

/// Stored label of one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRecord {
    /// Numeric label identifier.
    pub label_id: i64,
    /// Owning branch.
    pub branch_key: String,
    /// Trimmed display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Active flag used by the status filter.
    pub is_active: bool,
    /// Soft-delete marker.
    pub is_deleted: bool,
    /// Subject that created the label.
    pub created_by: Option<String>,
    /// Subject that last updated the label.
    pub updated_by: Option<String>,
    /// Creation timestamp in RFC3339.
    pub created_at: String,
    /// Last update timestamp in RFC3339.
    pub updated_at: String,
}

/// Create request as received from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLabelInput {
    /// Requested name, validated by the service.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag, defaults to `true`.
    pub is_active: Option<bool>,
}

/// Partial update request; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateLabelInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Validated label written by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLabel {
    /// Validated name.
    pub name: LabelName,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag.
    pub is_active: bool,
}

/// Validated partial update written by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelChanges {
    /// Validated new name.
    pub name: Option<LabelName>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Repository port for branch-scoped labels.
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// Lists non-deleted labels of the branch, optionally filtered by active flag.
    async fn list_labels(
        &self,
        branch_key: &str,
        is_active: Option<bool>,
    ) -> AppResult<Vec<LabelRecord>>;

    /// Finds a non-deleted label of the branch.
    async fn find_label(&self, branch_key: &str, label_id: i64) -> AppResult<Option<LabelRecord>>;

    /// Returns whether a non-deleted label of the branch already uses the name, ignoring case.
    async fn name_in_use(
        &self,
        branch_key: &str,
        name: &LabelName,
        exclude_label_id: Option<i64>,
    ) -> AppResult<bool>;

    /// Inserts a label.
    async fn create_label(
        &self,
        branch_key: &str,
        label: NewLabel,
        actor: Option<&str>,
    ) -> AppResult<LabelRecord>;

    /// Applies a partial update to a non-deleted label, `None` when it does not exist.
    async fn update_label(
        &self,
        branch_key: &str,
        label_id: i64,
        changes: LabelChanges,
        actor: Option<&str>,
    ) -> AppResult<Option<LabelRecord>>;

    /// Soft-deletes a label, returning whether a row was affected.
    async fn soft_delete_label(
        &self,
        branch_key: &str,
        label_id: i64,
        actor: Option<&str>,
    ) -> AppResult<bool>;
}
