use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use outreach_core::{AppError, AppResult};
use outreach_domain::{ActionGrants, Feature, FeatureAction, PermissionUniqueId};

use crate::{
    AuditEvent, AuditRepository, FeatureCatalogRepository, PermissionGrantInput, PermissionRecord,
    PermissionRepository, UpsertedPermission,
};

/// Single fake backing the catalog, permission and audit ports in service tests.
pub(crate) struct FakeStore {
    features: Mutex<Vec<Feature>>,
    actions: Mutex<Vec<FeatureAction>>,
    permissions: Mutex<Vec<PermissionRecord>>,
    audit_events: Mutex<Vec<AuditEvent>>,
    next_id: AtomicI64,
    fail_lookups: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeStore {
    /// Active `contacts` (read, write) and `reports` (read, export, inactive `purge`),
    /// plus an inactive `legacy` feature with `read`.
    pub(crate) fn with_contacts_catalog() -> Self {
        let features = [
            ("contacts", "Contacts", true),
            ("reports", "Reports", true),
            ("legacy", "Legacy", false),
        ]
        .into_iter()
        .filter_map(|(key, name, is_active)| Feature::new(key, name, is_active).ok())
        .collect();

        let actions = [
            ("contacts", "read", "Read", true),
            ("contacts", "write", "Write", true),
            ("reports", "read", "Read", true),
            ("reports", "export", "Export", true),
            ("reports", "purge", "Purge", false),
            ("legacy", "read", "Read", true),
        ]
        .into_iter()
        .filter_map(|(feature_key, action_key, action_name, is_active)| {
            FeatureAction::new(
                format!("{feature_key}.{action_key}"),
                feature_key,
                action_key,
                action_name,
                is_active,
            )
            .ok()
        })
        .collect();

        Self {
            features: Mutex::new(features),
            actions: Mutex::new(actions),
            permissions: Mutex::new(Vec::new()),
            audit_events: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_lookups: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub(crate) async fn seed_permission(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: ActionGrants,
    ) {
        self.seed_row(role_key, branch_key, feature_key, Some(action_grants))
            .await;
    }

    /// Seeds a row whose stored grants failed to decode.
    pub(crate) async fn seed_malformed_permission(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
    ) {
        self.seed_row(role_key, branch_key, feature_key, None).await;
    }

    pub(crate) fn fail_lookups(&self) {
        self.fail_lookups.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub(crate) async fn rows(&self) -> Vec<PermissionRecord> {
        self.permissions.lock().await.clone()
    }

    pub(crate) async fn audit_events(&self) -> Vec<AuditEvent> {
        self.audit_events.lock().await.clone()
    }

    async fn seed_row(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: Option<ActionGrants>,
    ) {
        let record = self.new_record(role_key, branch_key, feature_key, action_grants, None);
        self.permissions.lock().await.push(record);
    }

    fn new_record(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: Option<ActionGrants>,
        actor: Option<&str>,
    ) -> PermissionRecord {
        PermissionRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            unique_id: PermissionUniqueId::generate(),
            role_key: role_key.to_owned(),
            branch_key: branch_key.to_owned(),
            feature_key: feature_key.to_owned(),
            action_grants,
            can_be_deleted: true,
            is_active: true,
            is_deleted: false,
            created_by: actor.map(ToOwned::to_owned),
            updated_by: actor.map(ToOwned::to_owned),
            created_at: "2026-01-01T00:00:00Z".to_owned(),
            updated_at: "2026-01-01T00:00:00Z".to_owned(),
        }
    }

    fn check_lookup(&self) -> AppResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AppError::Internal("permission store unavailable".to_owned()));
        }
        Ok(())
    }

    fn check_write(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal("permission store unavailable".to_owned()));
        }
        Ok(())
    }

    fn upsert_locked(
        &self,
        rows: &mut Vec<PermissionRecord>,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: ActionGrants,
        actor: Option<&str>,
    ) -> UpsertedPermission {
        if let Some(row) = rows.iter_mut().find(|row| {
            row.role_key == role_key && row.branch_key == branch_key && row.feature_key == feature_key
        }) {
            row.action_grants = Some(action_grants);
            row.is_active = true;
            row.is_deleted = false;
            row.updated_by = actor.map(ToOwned::to_owned);
            return UpsertedPermission {
                permission: row.clone(),
                created: false,
            };
        }

        let record = self.new_record(role_key, branch_key, feature_key, Some(action_grants), actor);
        rows.push(record.clone());
        UpsertedPermission {
            permission: record,
            created: true,
        }
    }
}

#[async_trait]
impl FeatureCatalogRepository for FakeStore {
    async fn list_active_features(&self) -> AppResult<Vec<Feature>> {
        self.check_lookup()?;
        let mut features: Vec<Feature> = self
            .features
            .lock()
            .await
            .iter()
            .filter(|feature| feature.is_active())
            .cloned()
            .collect();
        features.sort_by(|left, right| left.key().cmp(right.key()));
        Ok(features)
    }

    async fn find_feature(&self, feature_key: &str) -> AppResult<Option<Feature>> {
        self.check_lookup()?;
        Ok(self
            .features
            .lock()
            .await
            .iter()
            .find(|feature| feature.key().as_str() == feature_key)
            .cloned())
    }

    async fn list_active_actions(&self, feature_key: &str) -> AppResult<Vec<FeatureAction>> {
        self.check_lookup()?;
        let mut actions: Vec<FeatureAction> = self
            .actions
            .lock()
            .await
            .iter()
            .filter(|action| action.feature_key().as_str() == feature_key && action.is_active())
            .cloned()
            .collect();
        actions.sort_by(|left, right| left.action_key().cmp(right.action_key()));
        Ok(actions)
    }

    async fn save_feature(&self, feature: Feature) -> AppResult<Feature> {
        self.check_write()?;
        let mut features = self.features.lock().await;
        features.retain(|existing| existing.key() != feature.key());
        features.push(feature.clone());
        Ok(feature)
    }

    async fn save_feature_action(&self, action: FeatureAction) -> AppResult<FeatureAction> {
        self.check_write()?;
        let mut actions = self.actions.lock().await;
        actions.retain(|existing| existing.feature_action_key() != action.feature_action_key());
        actions.push(action.clone());
        Ok(action)
    }
}

#[async_trait]
impl PermissionRepository for FakeStore {
    async fn find_active(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>> {
        self.check_lookup()?;
        Ok(self
            .permissions
            .lock()
            .await
            .iter()
            .filter(|row| {
                row.role_key == role_key
                    && row.branch_key == branch_key
                    && row.is_active
                    && !row.is_deleted
                    && feature_key.is_none_or(|feature_key| row.feature_key == feature_key)
            })
            .cloned()
            .collect())
    }

    async fn deactivate_all(&self, role_key: &str, branch_key: &str) -> AppResult<u64> {
        self.check_write()?;
        let mut affected = 0;
        for row in self.permissions.lock().await.iter_mut() {
            if row.role_key == role_key && row.branch_key == branch_key {
                row.is_active = false;
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn upsert(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: ActionGrants,
        actor: Option<&str>,
    ) -> AppResult<UpsertedPermission> {
        self.check_write()?;
        let mut rows = self.permissions.lock().await;
        Ok(self.upsert_locked(&mut rows, role_key, branch_key, feature_key, action_grants, actor))
    }

    async fn replace_for_scope(
        &self,
        role_key: &str,
        branch_key: &str,
        grants: Vec<PermissionGrantInput>,
        actor: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>> {
        self.check_write()?;
        let mut rows = self.permissions.lock().await;
        for row in rows.iter_mut() {
            if row.role_key == role_key && row.branch_key == branch_key {
                row.is_active = false;
            }
        }

        Ok(grants
            .into_iter()
            .map(|grant| {
                self.upsert_locked(
                    &mut rows,
                    role_key,
                    branch_key,
                    grant.feature_key.as_str(),
                    grant.action_grants,
                    actor,
                )
                .permission
            })
            .collect())
    }

    async fn mark_deleted_for_role(
        &self,
        role_key: &str,
        branch_key: &str,
        actor: Option<&str>,
    ) -> AppResult<u64> {
        self.check_write()?;
        let mut affected = 0;
        for row in self.permissions.lock().await.iter_mut() {
            if row.role_key == role_key && row.branch_key == branch_key && row.is_active {
                row.is_deleted = true;
                row.updated_by = actor.map(ToOwned::to_owned);
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn mark_active_for_role(
        &self,
        role_key: &str,
        branch_key: &str,
        is_active: bool,
        actor: Option<&str>,
    ) -> AppResult<u64> {
        self.check_write()?;
        let mut affected = 0;
        for row in self.permissions.lock().await.iter_mut() {
            if row.role_key == role_key && row.branch_key == branch_key && !row.is_deleted {
                row.is_active = is_active;
                row.updated_by = actor.map(ToOwned::to_owned);
                affected += 1;
            }
        }
        Ok(affected)
    }
}

#[async_trait]
impl AuditRepository for FakeStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.audit_events.lock().await.push(event);
        Ok(())
    }
}
