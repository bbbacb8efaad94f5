use std::sync::Arc;

use outreach_core::{AccessScope, AppError, AppResult};
use outreach_domain::{AuditAction, LabelName};
use tracing::info;

use crate::{
    AuditEvent, AuditRepository, CreateLabelInput, LabelChanges, LabelRecord, LabelRepository,
    NewLabel, UpdateLabelInput,
};

/// Application service for branch-scoped labels.
///
/// Callers reach it through a [`crate::RequestGuard`] for feature `label`;
/// the service itself trusts the scope it is given.
#[derive(Clone)]
pub struct LabelService {
    repository: Arc<dyn LabelRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl LabelService {
    /// Creates a new label service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn LabelRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            audit_repository,
        }
    }

    /// Lists labels of the scope's branch.
    pub async fn list_labels(
        &self,
        scope: &AccessScope,
        is_active: Option<bool>,
    ) -> AppResult<Vec<LabelRecord>> {
        self.repository
            .list_labels(scope.branch_key(), is_active)
            .await
    }

    /// Returns one label of the scope's branch.
    pub async fn get_label(&self, scope: &AccessScope, label_id: i64) -> AppResult<LabelRecord> {
        self.repository
            .find_label(scope.branch_key(), label_id)
            .await?
            .ok_or_else(|| label_not_found(label_id))
    }

    /// Creates a label with a unique name in the branch.
    pub async fn create_label(
        &self,
        scope: &AccessScope,
        actor: Option<&str>,
        input: CreateLabelInput,
    ) -> AppResult<LabelRecord> {
        let name = LabelName::new(input.name)?;
        self.ensure_name_available(scope, &name, None).await?;

        let label = self
            .repository
            .create_label(
                scope.branch_key(),
                NewLabel {
                    name,
                    description: input.description,
                    is_active: input.is_active.unwrap_or(true),
                },
                actor,
            )
            .await?;

        info!(branch_key = scope.branch_key(), label_id = label.label_id, "label created");
        self.append_audit(scope, actor, AuditAction::LabelCreated, &label)
            .await?;

        Ok(label)
    }

    /// Applies a partial update to a label.
    pub async fn update_label(
        &self,
        scope: &AccessScope,
        actor: Option<&str>,
        label_id: i64,
        input: UpdateLabelInput,
    ) -> AppResult<LabelRecord> {
        let name = input.name.map(LabelName::new).transpose()?;
        if let Some(name) = name.as_ref() {
            self.ensure_name_available(scope, name, Some(label_id))
                .await?;
        }

        let label = self
            .repository
            .update_label(
                scope.branch_key(),
                label_id,
                LabelChanges {
                    name,
                    description: input.description,
                    is_active: input.is_active,
                },
                actor,
            )
            .await?
            .ok_or_else(|| label_not_found(label_id))?;

        self.append_audit(scope, actor, AuditAction::LabelUpdated, &label)
            .await?;

        Ok(label)
    }

    /// Soft-deletes a label.
    pub async fn delete_label(
        &self,
        scope: &AccessScope,
        actor: Option<&str>,
        label_id: i64,
    ) -> AppResult<()> {
        let label = self.get_label(scope, label_id).await?;
        if !self
            .repository
            .soft_delete_label(scope.branch_key(), label_id, actor)
            .await?
        {
            return Err(label_not_found(label_id));
        }

        info!(branch_key = scope.branch_key(), label_id, "label deleted");
        self.append_audit(scope, actor, AuditAction::LabelDeleted, &label)
            .await
    }

    async fn ensure_name_available(
        &self,
        scope: &AccessScope,
        name: &LabelName,
        exclude_label_id: Option<i64>,
    ) -> AppResult<()> {
        if self
            .repository
            .name_in_use(scope.branch_key(), name, exclude_label_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Label Name '{}' already exists.",
                name.as_str()
            )));
        }

        Ok(())
    }

    async fn append_audit(
        &self,
        scope: &AccessScope,
        actor: Option<&str>,
        action: AuditAction,
        label: &LabelRecord,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                branch_key: scope.branch_key().to_owned(),
                subject: actor.unwrap_or("system").to_owned(),
                action,
                resource_type: "label".to_owned(),
                resource_id: label.label_id.to_string(),
                detail: Some(format!("label '{}'", label.name)),
            })
            .await
    }
}

fn label_not_found(label_id: i64) -> AppError {
    AppError::NotFound(format!("label '{label_id}' was not found"))
}
