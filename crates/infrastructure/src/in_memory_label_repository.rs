use std::collections::BTreeMap;

use async_trait::async_trait;
use outreach_application::{LabelChanges, LabelRecord, LabelRepository, NewLabel};
use outreach_core::{AppError, AppResult};
use outreach_domain::LabelName;
use tokio::sync::RwLock;

use crate::in_memory_timestamp::now_rfc3339;

#[derive(Debug, Default)]
struct LabelTable {
    labels: BTreeMap<i64, LabelRecord>,
    next_id: i64,
}

impl LabelTable {
    fn live_label_mut(&mut self, branch_key: &str, label_id: i64) -> Option<&mut LabelRecord> {
        self.labels
            .get_mut(&label_id)
            .filter(|label| label.branch_key == branch_key && !label.is_deleted)
    }

    fn name_taken(&self, branch_key: &str, name: &LabelName, exclude_label_id: Option<i64>) -> bool {
        let normalized = name.normalized();
        self.labels.values().any(|label| {
            label.branch_key == branch_key
                && !label.is_deleted
                && label.name.to_lowercase() == normalized
                && Some(label.label_id) != exclude_label_id
        })
    }
}

/// In-memory label repository.
#[derive(Debug, Default)]
pub struct InMemoryLabelRepository {
    table: RwLock<LabelTable>,
}

impl InMemoryLabelRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_name(name: &LabelName) -> AppError {
    AppError::Conflict(format!("Label Name '{}' already exists.", name.as_str()))
}

#[async_trait]
impl LabelRepository for InMemoryLabelRepository {
    async fn list_labels(
        &self,
        branch_key: &str,
        is_active: Option<bool>,
    ) -> AppResult<Vec<LabelRecord>> {
        Ok(self
            .table
            .read()
            .await
            .labels
            .values()
            .rev()
            .filter(|label| label.branch_key == branch_key && !label.is_deleted)
            .filter(|label| is_active.is_none_or(|is_active| label.is_active == is_active))
            .cloned()
            .collect())
    }

    async fn find_label(&self, branch_key: &str, label_id: i64) -> AppResult<Option<LabelRecord>> {
        Ok(self
            .table
            .read()
            .await
            .labels
            .get(&label_id)
            .filter(|label| label.branch_key == branch_key && !label.is_deleted)
            .cloned())
    }

    async fn name_in_use(
        &self,
        branch_key: &str,
        name: &LabelName,
        exclude_label_id: Option<i64>,
    ) -> AppResult<bool> {
        Ok(self
            .table
            .read()
            .await
            .name_taken(branch_key, name, exclude_label_id))
    }

    async fn create_label(
        &self,
        branch_key: &str,
        label: NewLabel,
        actor: Option<&str>,
    ) -> AppResult<LabelRecord> {
        let mut table = self.table.write().await;
        if table.name_taken(branch_key, &label.name, None) {
            return Err(duplicate_name(&label.name));
        }

        table.next_id += 1;
        let now = now_rfc3339();
        let record = LabelRecord {
            label_id: table.next_id,
            branch_key: branch_key.to_owned(),
            name: label.name.as_str().to_owned(),
            description: label.description,
            is_active: label.is_active,
            is_deleted: false,
            created_by: actor.map(ToOwned::to_owned),
            updated_by: actor.map(ToOwned::to_owned),
            created_at: now.clone(),
            updated_at: now,
        };
        table.labels.insert(record.label_id, record.clone());

        Ok(record)
    }

    async fn update_label(
        &self,
        branch_key: &str,
        label_id: i64,
        changes: LabelChanges,
        actor: Option<&str>,
    ) -> AppResult<Option<LabelRecord>> {
        let mut table = self.table.write().await;
        if let Some(name) = changes.name.as_ref()
            && table.name_taken(branch_key, name, Some(label_id))
        {
            return Err(duplicate_name(name));
        }

        let Some(label) = table.live_label_mut(branch_key, label_id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            label.name = name.as_str().to_owned();
        }
        if let Some(description) = changes.description {
            label.description = Some(description);
        }
        if let Some(is_active) = changes.is_active {
            label.is_active = is_active;
        }
        label.updated_by = actor.map(ToOwned::to_owned);
        label.updated_at = now_rfc3339();

        Ok(Some(label.clone()))
    }

    async fn soft_delete_label(
        &self,
        branch_key: &str,
        label_id: i64,
        actor: Option<&str>,
    ) -> AppResult<bool> {
        let mut table = self.table.write().await;
        let Some(label) = table.live_label_mut(branch_key, label_id) else {
            return Ok(false);
        };

        label.is_deleted = true;
        label.updated_by = actor.map(ToOwned::to_owned);
        label.updated_at = now_rfc3339();

        Ok(true)
    }
}
