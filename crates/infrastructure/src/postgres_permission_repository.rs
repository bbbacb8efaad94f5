use async_trait::async_trait;
use serde_json::Value;
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::warn;

use outreach_application::{
    PermissionGrantInput, PermissionRecord, PermissionRepository, UpsertedPermission,
};
use outreach_core::{AppError, AppResult};
use outreach_domain::{ActionGrants, PermissionUniqueId};


const PERMISSION_COLUMNS: &str = r#"
    id,
    unique_id,
    role_key,
    branch_key,
    feature_key,
    action_grants,
    can_be_deleted,
    is_active,
    is_deleted,
    created_by,
    updated_by,
    to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
    to_char(updated_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS updated_at
"#;

/// PostgreSQL-backed permission store.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: i64,
    unique_id: String,
    role_key: String,
    branch_key: String,
    feature_key: String,
    action_grants: Value,
    can_be_deleted: bool,
    is_active: bool,
    is_deleted: bool,
    created_by: Option<String>,
    updated_by: Option<String>,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, FromRow)]
struct UpsertedPermissionRow {
    #[sqlx(flatten)]
    permission: PermissionRow,
    created: bool,
}

impl TryFrom<PermissionRow> for PermissionRecord {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        let unique_id = PermissionUniqueId::parse(row.unique_id).map_err(|error| {
            AppError::Internal(format!("permission {} has a corrupt unique id: {error}", row.id))
        })?;

        let action_grants = match ActionGrants::decode(&row.action_grants) {
            Ok(action_grants) => Some(action_grants),
            Err(error) => {
                warn!(
                    unique_id = unique_id.as_str(),
                    %error,
                    "stored action grants could not be decoded"
                );
                None
            }
        };

        Ok(Self {
            id: row.id,
            unique_id,
            role_key: row.role_key,
            branch_key: row.branch_key,
            feature_key: row.feature_key,
            action_grants,
            can_be_deleted: row.can_be_deleted,
            is_active: row.is_active,
            is_deleted: row.is_deleted,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

async fn deactivate_all_rows(
    connection: &mut PgConnection,
    role_key: &str,
    branch_key: &str,
) -> AppResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE permissions
        SET is_active = FALSE,
            updated_at = now()
        WHERE role_key = $1
          AND branch_key = $2
          AND is_active
        "#,
    )
    .bind(role_key)
    .bind(branch_key)
    .execute(connection)
    .await
    .map_err(|error| {
        AppError::Internal(format!(
            "failed to deactivate permissions for role '{role_key}' in branch '{branch_key}': {error}"
        ))
    })?;

    Ok(result.rows_affected())
}

async fn upsert_row(
    connection: &mut PgConnection,
    role_key: &str,
    branch_key: &str,
    feature_key: &str,
    action_grants: &ActionGrants,
    actor: Option<&str>,
) -> AppResult<UpsertedPermission> {
    let row = sqlx::query_as::<_, UpsertedPermissionRow>(&format!(
        r#"
        INSERT INTO permissions (
            unique_id,
            role_key,
            branch_key,
            feature_key,
            action_grants,
            created_by,
            updated_by
        )
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (role_key, branch_key, feature_key)
        DO UPDATE
        SET action_grants = EXCLUDED.action_grants,
            is_active = TRUE,
            is_deleted = FALSE,
            updated_by = EXCLUDED.updated_by,
            updated_at = now()
        RETURNING {PERMISSION_COLUMNS}, (xmax = 0) AS created
        "#
    ))
    .bind(PermissionUniqueId::generate().as_str())
    .bind(role_key)
    .bind(branch_key)
    .bind(feature_key)
    .bind(action_grants.to_json())
    .bind(actor)
    .fetch_one(connection)
    .await
    .map_err(|error| {
        AppError::Internal(format!(
            "failed to upsert permission for feature '{feature_key}': {error}"
        ))
    })?;

    Ok(UpsertedPermission {
        permission: PermissionRecord::try_from(row.permission)?,
        created: row.created,
    })
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn find_active(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>> {
        let rows = sqlx::query_as::<_, PermissionRow>(&format!(
            r#"
            SELECT {PERMISSION_COLUMNS}
            FROM permissions
            WHERE role_key = $1
              AND branch_key = $2
              AND ($3::TEXT IS NULL OR feature_key = $3)
              AND is_active
              AND NOT is_deleted
            ORDER BY feature_key
            "#
        ))
        .bind(role_key)
        .bind(branch_key)
        .bind(feature_key)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list permissions for role '{role_key}' in branch '{branch_key}': {error}"
            ))
        })?;

        rows.into_iter().map(PermissionRecord::try_from).collect()
    }

    async fn deactivate_all(&self, role_key: &str, branch_key: &str) -> AppResult<u64> {
        let mut connection = self.pool.acquire().await.map_err(|error| {
            AppError::Internal(format!("failed to acquire connection: {error}"))
        })?;

        deactivate_all_rows(&mut connection, role_key, branch_key).await
    }

    async fn upsert(
        &self,
        role_key: &str,
        branch_key: &str,
        feature_key: &str,
        action_grants: ActionGrants,
        actor: Option<&str>,
    ) -> AppResult<UpsertedPermission> {
        let mut connection = self.pool.acquire().await.map_err(|error| {
            AppError::Internal(format!("failed to acquire connection: {error}"))
        })?;

        upsert_row(
            &mut connection,
            role_key,
            branch_key,
            feature_key,
            &action_grants,
            actor,
        )
        .await
    }

    async fn replace_for_scope(
        &self,
        role_key: &str,
        branch_key: &str,
        grants: Vec<PermissionGrantInput>,
        actor: Option<&str>,
    ) -> AppResult<Vec<PermissionRecord>> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1), hashtext($2))")
            .bind(role_key)
            .bind(branch_key)
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to lock permissions for role '{role_key}' in branch '{branch_key}': {error}"
                ))
            })?;

        deactivate_all_rows(&mut transaction, role_key, branch_key).await?;

        let mut permissions = Vec::with_capacity(grants.len());
        for grant in &grants {
            let upserted = upsert_row(
                &mut transaction,
                role_key,
                branch_key,
                grant.feature_key.as_str(),
                &grant.action_grants,
                actor,
            )
            .await?;
            permissions.push(upserted.permission);
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(permissions)
    }

    async fn mark_deleted_for_role(
        &self,
        role_key: &str,
        branch_key: &str,
        actor: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE permissions
            SET is_deleted = TRUE,
                updated_by = $3,
                updated_at = now()
            WHERE role_key = $1
              AND branch_key = $2
              AND is_active
              AND NOT is_deleted
            "#,
        )
        .bind(role_key)
        .bind(branch_key)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete permissions for role '{role_key}' in branch '{branch_key}': {error}"
            ))
        })?;

        Ok(result.rows_affected())
    }

    async fn mark_active_for_role(
        &self,
        role_key: &str,
        branch_key: &str,
        is_active: bool,
        actor: Option<&str>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE permissions
            SET is_active = $3,
                updated_by = $4,
                updated_at = now()
            WHERE role_key = $1
              AND branch_key = $2
              AND NOT is_deleted
            "#,
        )
        .bind(role_key)
        .bind(branch_key)
        .bind(is_active)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to update status of permissions for role '{role_key}' in branch '{branch_key}': {error}"
            ))
        })?;

        Ok(result.rows_affected())
    }
}
