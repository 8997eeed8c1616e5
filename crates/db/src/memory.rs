//! In-process store used when no database is configured, and by tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use udyam_core::submission::{SubmissionForm, SubmissionStatus};
use udyam_core::types::{LogId, SubmissionId};

use crate::error::{StoreError, StoreResult};
use crate::models::submission::{
    FormSubmission, SubmissionDetail, SubmissionQuery, SubmissionSummary, UpdateSubmissionStatus,
};
use crate::models::validation_log::{CreateValidationLog, FieldStats, ValidationLog};
use crate::store::{SubmissionStore, ValidationLogStore, DUPLICATE_SUBMISSION};

#[derive(Debug, Default)]
struct Inner {
    /// Insertion order; the newest submission is last.
    submissions: Vec<FormSubmission>,
    /// Insertion order; the newest entry is last.
    logs: Vec<ValidationLog>,
    next_log_id: LogId,
}

impl Inner {
    fn push_log(&mut self, entry: CreateValidationLog, form_submission_id: Option<SubmissionId>) {
        self.next_log_id += 1;
        self.logs.push(ValidationLog {
            id: self.next_log_id,
            field_name: entry.field_name,
            field_value: entry.field_value,
            validation_type: entry.validation_type,
            is_valid: entry.is_valid,
            error_message: entry.error_message,
            form_submission_id,
            created_at: Utc::now(),
        });
    }

    /// Newest non-rejected submission sharing the Aadhaar or PAN, skipping `exclude`.
    fn active_by_identity(
        &self,
        aadhaar_number: &str,
        pan_number: &str,
        exclude: Option<SubmissionId>,
    ) -> Option<&FormSubmission> {
        self.submissions.iter().rev().find(|s| {
            Some(s.id) != exclude
                && !s.status.is_superseded()
                && (s.aadhaar_number == aadhaar_number || s.pan_number == pan_number)
        })
    }
}

/// Both store traits over a single `RwLock`.
///
/// The duplicate-identity check and the insert happen under one write lock,
/// so concurrent submissions cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn create(
        &self,
        form: &SubmissionForm,
        logs: Vec<CreateValidationLog>,
    ) -> StoreResult<FormSubmission> {
        let mut inner = self.inner.write().await;
        if inner
            .active_by_identity(&form.aadhaar_number, &form.pan_number, None)
            .is_some()
        {
            return Err(StoreError::Conflict(DUPLICATE_SUBMISSION.to_string()));
        }

        let now = Utc::now();
        let submission = FormSubmission {
            id: uuid::Uuid::now_v7(),
            aadhaar_number: form.aadhaar_number.clone(),
            mobile_number: form.mobile_number.clone(),
            email_address: form.email_address.clone(),
            otp_verified: form.otp_verified,
            pan_number: form.pan_number.clone(),
            business_name: form.business_name.clone(),
            business_type: form.business_type.clone(),
            address_line1: form.address_line1.clone(),
            address_line2: form.address_line2.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            pincode: form.pincode.clone(),
            status: SubmissionStatus::Pending,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        inner.submissions.push(submission.clone());
        for log in logs {
            inner.push_log(log, Some(submission.id));
        }
        Ok(submission)
    }

    async fn find_by_id(&self, id: SubmissionId) -> StoreResult<Option<SubmissionDetail>> {
        let inner = self.inner.read().await;
        Ok(inner
            .submissions
            .iter()
            .find(|s| s.id == id)
            .map(|submission| SubmissionDetail {
                submission: submission.clone(),
                validation_logs: inner
                    .logs
                    .iter()
                    .filter(|l| l.form_submission_id == Some(id))
                    .cloned()
                    .collect(),
            }))
    }

    async fn find_active_by_identity(
        &self,
        aadhaar_number: &str,
        pan_number: &str,
    ) -> StoreResult<Option<FormSubmission>> {
        let inner = self.inner.read().await;
        Ok(inner
            .active_by_identity(aadhaar_number, pan_number, None)
            .cloned())
    }

    async fn list(&self, query: &SubmissionQuery) -> StoreResult<(Vec<SubmissionSummary>, i64)> {
        let inner = self.inner.read().await;
        let matching: Vec<&FormSubmission> = inner
            .submissions
            .iter()
            .rev()
            .filter(|s| query.matches(s))
            .collect();
        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .map(SubmissionSummary::from)
            .collect();
        Ok((page, total))
    }

    async fn update_status(
        &self,
        id: SubmissionId,
        input: &UpdateSubmissionStatus,
    ) -> StoreResult<Option<FormSubmission>> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.submissions.iter().position(|s| s.id == id) else {
            return Ok(None);
        };

        if !input.status.is_superseded() {
            let current = &inner.submissions[index];
            if inner
                .active_by_identity(&current.aadhaar_number, &current.pan_number, Some(id))
                .is_some()
            {
                return Err(StoreError::Conflict(DUPLICATE_SUBMISSION.to_string()));
            }
        }

        let submission = &mut inner.submissions[index];
        submission.status = input.status;
        submission.notes = input.notes.clone();
        submission.updated_at = Utc::now();
        Ok(Some(submission.clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[async_trait]
impl ValidationLogStore for MemoryStore {
    async fn record(&self, entry: CreateValidationLog) -> StoreResult<()> {
        self.inner.write().await.push_log(entry, None);
        Ok(())
    }

    async fn record_many(&self, entries: Vec<CreateValidationLog>) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        for entry in entries {
            inner.push_log(entry, None);
        }
        Ok(())
    }

    async fn field_stats(&self) -> StoreResult<BTreeMap<String, FieldStats>> {
        let inner = self.inner.read().await;
        let mut stats: BTreeMap<String, FieldStats> = BTreeMap::new();
        for log in &inner.logs {
            let entry = stats.entry(log.field_name.clone()).or_default();
            if log.is_valid {
                entry.valid += 1;
            } else {
                entry.invalid += 1;
            }
        }
        Ok(stats)
    }

    async fn history(
        &self,
        field_name: &str,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<ValidationLog>, i64)> {
        let inner = self.inner.read().await;
        let matching: Vec<&ValidationLog> = inner
            .logs
            .iter()
            .rev()
            .filter(|l| l.field_name.eq_ignore_ascii_case(field_name))
            .collect();
        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }
}
