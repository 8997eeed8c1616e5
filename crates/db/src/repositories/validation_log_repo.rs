//! Repository for the `validation_logs` table.

use sqlx::{PgConnection, PgPool};
use udyam_core::types::SubmissionId;

use crate::models::validation_log::{CreateValidationLog, FieldStatRow, ValidationLog};

/// Column list for `validation_logs` queries.
const COLUMNS: &str = "id, field_name, field_value, validation_type, is_valid, \
     error_message, form_submission_id, created_at";

/// Provides append and query operations for the validation audit log.
pub struct ValidationLogRepo;

impl ValidationLogRepo {
    /// Append one log entry, optionally linked to a submission.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateValidationLog,
        form_submission_id: Option<SubmissionId>,
    ) -> Result<ValidationLog, sqlx::Error> {
        let sql = format!(
            "INSERT INTO validation_logs \
                (field_name, field_value, validation_type, is_valid, error_message, \
                 form_submission_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ValidationLog>(&sql)
            .bind(&input.field_name)
            .bind(&input.field_value)
            .bind(&input.validation_type)
            .bind(input.is_valid)
            .bind(&input.error_message)
            .bind(form_submission_id)
            .fetch_one(conn)
            .await
    }

    /// Logs linked to a submission, oldest first.
    pub async fn list_by_submission(
        pool: &PgPool,
        form_submission_id: SubmissionId,
    ) -> Result<Vec<ValidationLog>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM validation_logs \
             WHERE form_submission_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, ValidationLog>(&sql)
            .bind(form_submission_id)
            .fetch_all(pool)
            .await
    }

    /// Counts grouped by field name and validity.
    pub async fn stats(pool: &PgPool) -> Result<Vec<FieldStatRow>, sqlx::Error> {
        sqlx::query_as::<_, FieldStatRow>(
            "SELECT field_name, is_valid, COUNT(*) AS count \
             FROM validation_logs \
             GROUP BY field_name, is_valid \
             ORDER BY field_name",
        )
        .fetch_all(pool)
        .await
    }

    /// History for one field name (case-insensitive), newest first.
    pub async fn history(
        pool: &PgPool,
        field_name: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ValidationLog>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM validation_logs \
             WHERE LOWER(field_name) = LOWER($1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ValidationLog>(&sql)
            .bind(field_name)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total history rows for one field name (case-insensitive).
    pub async fn count_history(pool: &PgPool, field_name: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM validation_logs WHERE LOWER(field_name) = LOWER($1)",
        )
        .bind(field_name)
        .fetch_one(pool)
        .await
    }
}
