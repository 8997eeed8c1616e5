//! Repository for the `form_submissions` table.

use sqlx::{PgConnection, PgPool};
use udyam_core::submission::{SubmissionForm, SubmissionStatus};
use udyam_core::types::SubmissionId;

use crate::models::submission::{
    FormSubmission, SubmissionQuery, SubmissionSummary, UpdateSubmissionStatus,
};

/// Column list for full `form_submissions` rows.
const COLUMNS: &str = "id, aadhaar_number, mobile_number, email_address, otp_verified, \
     pan_number, business_name, business_type, address_line1, address_line2, \
     city, state, pincode, status, notes, created_at, updated_at";

/// Column list for the listing projection.
const SUMMARY_COLUMNS: &str =
    "id, business_name, business_type, status, created_at, aadhaar_number, pan_number";

/// Shared filter for listing and counting. `$1` is the status, `$2` the
/// escaped `ILIKE` pattern; either may be NULL.
const FILTER: &str = "($1::TEXT IS NULL OR status = $1) \
     AND ($2::TEXT IS NULL \
          OR business_name ILIKE $2 \
          OR aadhaar_number ILIKE $2 \
          OR pan_number ILIKE $2 \
          OR mobile_number ILIKE $2)";

/// Provides CRUD operations for form submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a normalized form with status `PENDING`.
    ///
    /// Takes a connection so the insert can share a transaction with the
    /// submission's validation logs.
    pub async fn insert(
        conn: &mut PgConnection,
        id: SubmissionId,
        form: &SubmissionForm,
    ) -> Result<FormSubmission, sqlx::Error> {
        let sql = format!(
            "INSERT INTO form_submissions \
                (id, aadhaar_number, mobile_number, email_address, otp_verified, \
                 pan_number, business_name, business_type, address_line1, address_line2, \
                 city, state, pincode, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSubmission>(&sql)
            .bind(id)
            .bind(&form.aadhaar_number)
            .bind(&form.mobile_number)
            .bind(&form.email_address)
            .bind(form.otp_verified)
            .bind(&form.pan_number)
            .bind(&form.business_name)
            .bind(&form.business_type)
            .bind(&form.address_line1)
            .bind(&form.address_line2)
            .bind(&form.city)
            .bind(&form.state)
            .bind(&form.pincode)
            .bind(SubmissionStatus::Pending.as_str())
            .fetch_one(conn)
            .await
    }

    /// Find a submission by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: SubmissionId,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM form_submissions WHERE id = $1");
        sqlx::query_as::<_, FormSubmission>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-rejected submission sharing the Aadhaar or the PAN.
    pub async fn find_active_by_identity(
        pool: &PgPool,
        aadhaar_number: &str,
        pan_number: &str,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM form_submissions \
             WHERE (aadhaar_number = $1 OR pan_number = $2) \
               AND status <> $3 \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, FormSubmission>(&sql)
            .bind(aadhaar_number)
            .bind(pan_number)
            .bind(SubmissionStatus::Rejected.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List submissions newest first, filtered by status and search term.
    pub async fn list(
        pool: &PgPool,
        query: &SubmissionQuery,
    ) -> Result<Vec<SubmissionSummary>, sqlx::Error> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM form_submissions \
             WHERE {FILTER} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SubmissionSummary>(&sql)
            .bind(query.status.map(SubmissionStatus::as_str))
            .bind(query.search_term().map(contains_pattern))
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(pool)
            .await
    }

    /// Count submissions matching the same filters as [`Self::list`].
    pub async fn count(pool: &PgPool, query: &SubmissionQuery) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM form_submissions WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(query.status.map(SubmissionStatus::as_str))
            .bind(query.search_term().map(contains_pattern))
            .fetch_one(pool)
            .await
    }

    /// Set the status and notes, bumping `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: SubmissionId,
        input: &UpdateSubmissionStatus,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let sql = format!(
            "UPDATE form_submissions SET \
                status = $2, \
                notes = $3, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSubmission>(&sql)
            .bind(id)
            .bind(input.status.as_str())
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }
}

/// Build an `ILIKE` substring pattern with `%`, `_` and `\` escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
