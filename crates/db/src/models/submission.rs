//! Models for stored registration form submissions.

use serde::Serialize;
use sqlx::FromRow;
use udyam_core::submission::SubmissionStatus;
use udyam_core::types::{SubmissionId, Timestamp};

use super::validation_log::ValidationLog;

/// A row from the `form_submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormSubmission {
    pub id: SubmissionId,
    pub aadhaar_number: String,
    pub mobile_number: String,
    pub email_address: String,
    pub otp_verified: bool,
    pub pan_number: String,
    pub business_name: String,
    pub business_type: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[sqlx(try_from = "String")]
    pub status: SubmissionStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A submission together with the validation logs recorded for it.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: FormSubmission,
    pub validation_logs: Vec<ValidationLog>,
}

/// The listing projection of a submission.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionSummary {
    pub id: SubmissionId,
    pub business_name: String,
    pub business_type: String,
    #[sqlx(try_from = "String")]
    pub status: SubmissionStatus,
    pub created_at: Timestamp,
    pub aadhaar_number: String,
    pub pan_number: String,
}

impl From<&FormSubmission> for SubmissionSummary {
    fn from(s: &FormSubmission) -> Self {
        Self {
            id: s.id,
            business_name: s.business_name.clone(),
            business_type: s.business_type.clone(),
            status: s.status,
            created_at: s.created_at,
            aadhaar_number: s.aadhaar_number.clone(),
            pan_number: s.pan_number.clone(),
        }
    }
}

/// Filters and paging for submission listings. `limit` and `offset` are
/// expected to be clamped by the caller.
#[derive(Debug, Clone, Default)]
pub struct SubmissionQuery {
    pub status: Option<SubmissionStatus>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl SubmissionQuery {
    /// Search term with surrounding whitespace removed; blank terms are ignored.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// True when `s` passes the status filter and the search term.
    ///
    /// The search matches the business name, Aadhaar, PAN or mobile number
    /// as a case-insensitive substring.
    pub fn matches(&self, s: &FormSubmission) -> bool {
        if self.status.is_some_and(|status| status != s.status) {
            return false;
        }
        match self.search_term() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    &s.business_name,
                    &s.aadhaar_number,
                    &s.pan_number,
                    &s.mobile_number,
                ]
                .iter()
                .any(|value| value.to_lowercase().contains(&term))
            }
        }
    }
}

/// DTO for changing a submission's review status.
#[derive(Debug, Clone)]
pub struct UpdateSubmissionStatus {
    pub status: SubmissionStatus,
    pub notes: Option<String>,
}
