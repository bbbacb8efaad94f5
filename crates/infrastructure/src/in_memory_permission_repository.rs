use std::collections::HashMap;

use async_trait::async_trait;
use outreach_application::{
    PermissionGrantInput, PermissionRecord, PermissionRepository, UpsertedPermission,
};
use outreach_core::AppResult;
use outreach_domain::{ActionGrants, PermissionUniqueId};
use tokio::sync::RwLock;

use crate::in_memory_timestamp::now_rfc3339;


type PermissionKey = (String, String, String);

#[derive(Debug, Default)]
struct PermissionTable {
    rows: HashMap<PermissionKey, PermissionRecord>,
    next_id: i64,
}

impl PermissionTable {
    fn rows_for_scope<'a>(
        &'a mut self,
        role_key: &'a str,
        branch_key: &'a str,
    ) -> impl Iterator<Item = &'a mut PermissionRecord> + 'a {
        self.rows
            .values_mut()
            .filter(move |row| row.role_key == role_key && row.branch_key == branch_key)
    }

    fn deactivate_all(&mut self, role_key: &str, branch_key: &str) -> u64 {
        let now = now_rfc3339();
        let mut affected = 0;
        for row in self.rows_for_scope(role_key, branch_key) {
            if row.is_active {
                row.is_active = false;
                row.updated_at = now.clone();
                affected += 1;
            }
        }

        affected
    }

    fn upsert(
        &mut self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: ActionGrants,
        actor: Option<&str>,
    ) -> UpsertedPermission {
        let now = now_rfc3339();
        let key = (
            role_key.to_owned(),
            branch_key.to_owned(),
            feature_key.to_owned(),
        );

        if let Some(row) = self.rows.get_mut(&key) {
            row.action_grants = Some(action_grants);
            row.is_active = true;
            row.is_deleted = false;
            row.updated_by = actor.map(ToOwned::to_owned);
            row.updated_at = now;
            return UpsertedPermission {
                permission: row.clone(),
                created: false,
            };
        }

        self.next_id += 1;
        let permission = PermissionRecord {
            id: self.next_id,
            unique_id: PermissionUniqueId::generate(),
            role_key: key.0.clone(),
            branch_key: key.1.clone(),
            feature_key: key.2.clone(),
            action_grants: Some(action_grants),
            can_be_deleted: true,
            is_active: true,
            is_deleted: false,
            created_by: actor.map(ToOwned::to_owned),
            updated_by: actor.map(ToOwned::to_owned),
            created_at: now.clone(),
            updated_at: now,
        };
        self.rows.insert(key, permission.clone());

        UpsertedPermission {
            permission,
            created: true,
        }
    }
}

/// In-memory permission store.
///
/// `replace_for_scope` holds the write lock across deactivation and upserts,
/// so readers observe either the previous or the new grant set.
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepository {
    table: RwLock<PermissionTable>,
}

impl InMemoryPermissionRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn find_active(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>> {
        let table = self.table.read().await;
        let mut rows: Vec<PermissionRecord> = table
            .rows
            .values()
            .filter(|row| {
                row.role_key == role_key
                    && row.branch_key == branch_key
                    && row.is_active
                    && !row.is_deleted
                    && feature_key.is_none_or(|feature_key| row.feature_key == feature_key)
            })
            .cloned()
            .collect();
        rows.sort_by(|left, right| left.feature_key.cmp(&right.feature_key));

        Ok(rows)
    }

    async fn deactivate_all(&self, role_key: &str, branch_key: &str) -> AppResult<u64> {
        Ok(self.table.write().await.deactivate_all(role_key, branch_key))
    }

    async fn upsert(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: ActionGrants,
        actor: Option<&str>,
    ) -> AppResult<UpsertedPermission> {
        Ok(self
            .table
            .write()
            .await
            .upsert(role_key, branch_key, feature_key, action_grants, actor))
    }

    async fn replace_for_scope(
        &self,
        role_key: &str,
        branch_key: &str,
        grants: Vec<PermissionGrantInput>,
        actor: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>> {
        let mut table = self.table.write().await;
        table.deactivate_all(role_key, branch_key);

        Ok(grants
            .into_iter()
            .map(|grant| {
                table
                    .upsert(
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
        let now = now_rfc3339();
        let mut table = self.table.write().await;
        let mut affected = 0;
        for row in table.rows_for_scope(role_key, branch_key) {
            if row.is_active && !row.is_deleted {
                row.is_deleted = true;
                row.updated_by = actor.map(ToOwned::to_owned);
                row.updated_at = now.clone();
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
        let now = now_rfc3339();
        let mut table = self.table.write().await;
        let mut affected = 0;
        for row in table.rows_for_scope(role_key, branch_key) {
            if !row.is_deleted {
                row.is_active = is_active;
                row.updated_by = actor.map(ToOwned::to_owned);
                row.updated_at = now.clone();
                affected += 1;
            }
        }

        Ok(affected)
    }
}
