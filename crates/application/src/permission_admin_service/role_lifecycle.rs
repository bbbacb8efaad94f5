use outreach_domain::AuditAction;
use tracing::info;

use super::*;

impl PermissionAdminService {
    /// Applies a role activation or deactivation signal to the pair's grants.
    pub async fn set_role_active(
        &self,
        scope: &AccessScope,
        actor: Option<&str>,
        is_active: bool,
    ) -> AppResult<u64> {
        let affected = self
            .permission_repository
            .mark_active_for_role(scope.role_key(), scope.branch_key(), is_active, actor)
            .await?;

        info!(%scope, is_active, affected, "role status applied to permissions");

        self.append_audit(
            scope,
            actor,
            AuditAction::SecurityRoleStatusChanged,
            format!("set is_active={is_active} on {affected} permissions"),
        )
        .await?;

        Ok(affected)
    }

    /// Applies a role deletion signal, soft-deleting the pair's active grants.
    pub async fn delete_role(&self, scope: &AccessScope, actor: Option<&str>) -> AppResult<u64> {
        let affected = self
            .permission_repository
            .mark_deleted_for_role(scope.role_key(), scope.branch_key(), actor)
            .await?;

        info!(%scope, affected, "role deletion applied to permissions");

        self.append_audit(
            scope,
            actor,
            AuditAction::SecurityRoleDeleted,
            format!("deleted {affected} permissions"),
        )
        .await?;

        Ok(affected)
    }
}
