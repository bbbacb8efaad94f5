use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use outreach_application::{LabelChanges, LabelRecord, LabelRepository, NewLabel};
use outreach_core::{AppError, AppResult};
use outreach_domain::LabelName;

const LABEL_COLUMNS: &str = r#"
    id AS label_id,
    branch_key,
    name,
    description,
    is_active,
    is_deleted,
    created_by,
    updated_by,
    to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
    to_char(updated_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS updated_at
"#;

/// PostgreSQL-backed label repository.
#[derive(Clone)]
pub struct PostgresLabelRepository {
    pool: PgPool,
}

impl PostgresLabelRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LabelRow {
    label_id: i64,
    branch_key: String,
    name: String,
    description: Option<String>,
    is_active: bool,
    is_deleted: bool,
    created_by: Option<String>,
    updated_by: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<LabelRow> for LabelRecord {
    fn from(row: LabelRow) -> Self {
        Self {
            label_id: row.label_id,
            branch_key: row.branch_key,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            is_deleted: row.is_deleted,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn map_write_error(error: sqlx::Error, name: Option<&LabelName>) -> AppError {
    if let (sqlx::Error::Database(database_error), Some(name)) = (&error, name)
        && database_error.is_unique_violation()
    {
        return AppError::Conflict(format!("Label Name '{}' already exists.", name.as_str()));
    }

    AppError::Internal(format!("failed to save label: {error}"))
}

#[async_trait]
impl LabelRepository for PostgresLabelRepository {
    async fn list_labels(
        &self,
        branch_key: &str,
        is_active: Option<bool>,
    ) -> AppResult<Vec<LabelRecord>> {
        let rows = sqlx::query_as::<_, LabelRow>(&format!(
            r#"
            SELECT {LABEL_COLUMNS}
            FROM labels
            WHERE branch_key = $1
              AND NOT is_deleted
              AND ($2::BOOLEAN IS NULL OR is_active = $2)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(branch_key)
        .bind(is_active)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list labels for branch '{branch_key}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(LabelRecord::from).collect())
    }

    async fn find_label(&self, branch_key: &str, label_id: i64) -> AppResult<Option<LabelRecord>> {
        let row = sqlx::query_as::<_, LabelRow>(&format!(
            r#"
            SELECT {LABEL_COLUMNS}
            FROM labels
            WHERE branch_key = $1
              AND id = $2
              AND NOT is_deleted
            "#
        ))
        .bind(branch_key)
        .bind(label_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find label '{label_id}': {error}"))
        })?;

        Ok(row.map(LabelRecord::from))
    }

    async fn name_in_use(
        &self,
        branch_key: &str,
        name: &LabelName,
        exclude_label_id: Option<i64>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM labels
                WHERE branch_key = $1
                  AND lower(name) = $2
                  AND NOT is_deleted
                  AND ($3::BIGINT IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(branch_key)
        .bind(name.normalized())
        .bind(exclude_label_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check label name uniqueness: {error}"))
        })
    }

    async fn create_label(
        &self,
        branch_key: &str,
        label: NewLabel,
        actor: Option<&str>,
    ) -> AppResult<LabelRecord> {
        let row = sqlx::query_as::<_, LabelRow>(&format!(
            r#"
            INSERT INTO labels (branch_key, name, description, is_active, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {LABEL_COLUMNS}
            "#
        ))
        .bind(branch_key)
        .bind(label.name.as_str())
        .bind(label.description.as_deref())
        .bind(label.is_active)
        .bind(actor)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_write_error(error, Some(&label.name)))?;

        Ok(row.into())
    }

    async fn update_label(
        &self,
        branch_key: &str,
        label_id: i64,
        changes: LabelChanges,
        actor: Option<&str>,
    ) -> AppResult<Option<LabelRecord>> {
        let row = sqlx::query_as::<_, LabelRow>(&format!(
            r#"
            UPDATE labels
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                is_active = COALESCE($5, is_active),
                updated_by = $6,
                updated_at = now()
            WHERE branch_key = $1
              AND id = $2
              AND NOT is_deleted
            RETURNING {LABEL_COLUMNS}
            "#
        ))
        .bind(branch_key)
        .bind(label_id)
        .bind(changes.name.as_ref().map(LabelName::as_str))
        .bind(changes.description.as_deref())
        .bind(changes.is_active)
        .bind(actor)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_write_error(error, changes.name.as_ref()))?;

        Ok(row.map(LabelRecord::from))
    }

    async fn soft_delete_label(
        &self,
        branch_key: &str,
        label_id: i64,
        actor: Option<&str>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE labels
            SET is_deleted = TRUE,
                updated_by = $3,
                updated_at = now()
            WHERE branch_key = $1
              AND id = $2
              AND NOT is_deleted
            "#,
        )
        .bind(branch_key)
        .bind(label_id)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete label '{label_id}': {error}"))
        })?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use outreach_application::{LabelChanges, LabelRepository, NewLabel};
    use outreach_core::AppError;
    use outreach_domain::LabelName;

    use super::PostgresLabelRepository;
    use crate::postgres_test_support::{test_pool, unique_key};

    fn new_label(name: &str) -> NewLabel {
        NewLabel {
            name: LabelName::new(name).unwrap_or_else(|_| unreachable!()),
            description: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn live_names_are_unique_per_branch_ignoring_case() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresLabelRepository::new(pool);
        let branch_key = unique_key("branch");

        let created = repository
            .create_label(branch_key.as_str(), new_label("Leads"), Some("user-1"))
            .await;
        assert!(created.is_ok());
        let created = created.unwrap_or_else(|_| unreachable!());

        let name = LabelName::new("LEADS").unwrap_or_else(|_| unreachable!());
        let in_use = repository
            .name_in_use(branch_key.as_str(), &name, None)
            .await;
        assert!(in_use.unwrap_or_default());
        let own_name = repository
            .name_in_use(branch_key.as_str(), &name, Some(created.label_id))
            .await;
        assert!(!own_name.unwrap_or(true));

        let duplicate = repository
            .create_label(branch_key.as_str(), new_label("leads"), None)
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let deleted = repository
            .soft_delete_label(branch_key.as_str(), created.label_id, None)
            .await;
        assert!(deleted.unwrap_or_default());
        assert!(
            repository
                .create_label(branch_key.as_str(), new_label("leads"), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn partial_update_keeps_unset_fields() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let repository = PostgresLabelRepository::new(pool);
        let branch_key = unique_key("branch");
        let created = repository
            .create_label(
                branch_key.as_str(),
                NewLabel {
                    description: Some("hot prospects".to_owned()),
                    ..new_label("Leads")
                },
                None,
            )
            .await
            .unwrap_or_else(|_| unreachable!());

        let updated = repository
            .update_label(
                branch_key.as_str(),
                created.label_id,
                LabelChanges {
                    is_active: Some(false),
                    ..LabelChanges::default()
                },
                Some("user-2"),
            )
            .await
            .unwrap_or_default();
        assert!(updated.is_some());
        let updated = updated.unwrap_or_else(|| unreachable!());
        assert_eq!(updated.name, "Leads");
        assert_eq!(updated.description.as_deref(), Some("hot prospects"));
        assert!(!updated.is_active);

        let inactive = repository
            .list_labels(branch_key.as_str(), Some(false))
            .await
            .unwrap_or_default();
        assert_eq!(inactive.len(), 1);
        let missing = repository
            .update_label(branch_key.as_str(), -1, LabelChanges::default(), None)
            .await
            .unwrap_or_default();
        assert!(missing.is_none());
    }
}
