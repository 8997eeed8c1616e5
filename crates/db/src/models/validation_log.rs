//! Models for the validation audit log.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::FromRow;
use udyam_core::types::{LogId, SubmissionId, Timestamp};
use udyam_core::validation::ValidationOutcome;

/// Category label used for postal-code lookups.
pub const PINCODE_LOOKUP: &str = "pincode_lookup";

/// A row from the `validation_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ValidationLog {
    pub id: LogId,
    pub field_name: String,
    pub field_value: String,
    pub validation_type: String,
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub form_submission_id: Option<SubmissionId>,
    pub created_at: Timestamp,
}

/// DTO for recording one validation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateValidationLog {
    pub field_name: String,
    pub field_value: String,
    pub validation_type: String,
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl CreateValidationLog {
    pub fn from_outcome(
        field_name: &str,
        field_value: &str,
        validation_type: &str,
        outcome: &ValidationOutcome,
    ) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_value: field_value.to_string(),
            validation_type: validation_type.to_string(),
            is_valid: outcome.is_valid(),
            error_message: outcome.error_message().map(str::to_string),
        }
    }
}

/// Valid/invalid counts for one field name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldStats {
    pub valid: i64,
    pub invalid: i64,
}

/// One `GROUP BY field_name, is_valid` row.
#[derive(Debug, Clone, FromRow)]
pub struct FieldStatRow {
    pub field_name: String,
    pub is_valid: bool,
    pub count: i64,
}

/// Fold grouped counts into per-field stats keyed by field name.
pub fn fold_stats<I>(rows: I) -> BTreeMap<String, FieldStats>
where
    I: IntoIterator<Item = FieldStatRow>,
{
    let mut stats: BTreeMap<String, FieldStats> = BTreeMap::new();
    for row in rows {
        let entry = stats.entry(row.field_name).or_default();
        if row.is_valid {
            entry.valid += row.count;
        } else {
            entry.invalid += row.count;
        }
    }
    stats
}
