//! Store traits consumed by the HTTP layer, and the PostgreSQL backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use udyam_core::submission::SubmissionForm;
use udyam_core::types::SubmissionId;

use crate::error::{classify_unique_violation, StoreResult};
use crate::models::submission::{
    FormSubmission, SubmissionDetail, SubmissionQuery, SubmissionSummary, UpdateSubmissionStatus,
};
use crate::models::validation_log::{fold_stats, CreateValidationLog, FieldStats, ValidationLog};
use crate::repositories::{SubmissionRepo, ValidationLogRepo};
use crate::{DbPool, StoreError};

/// Conflict message for a second active submission with the same identity.
pub const DUPLICATE_SUBMISSION: &str =
    "A submission with this Aadhaar number or PAN already exists";

/// Registration form submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a normalized form as `PENDING` together with its field logs.
    ///
    /// Fails with [`StoreError::Conflict`] when a non-rejected submission
    /// already has the same Aadhaar or PAN.
    async fn create(
        &self,
        form: &SubmissionForm,
        logs: Vec<CreateValidationLog>,
    ) -> StoreResult<FormSubmission>;

    async fn find_by_id(&self, id: SubmissionId) -> StoreResult<Option<SubmissionDetail>>;

    async fn find_active_by_identity(
        &self,
        aadhaar_number: &str,
        pan_number: &str,
    ) -> StoreResult<Option<FormSubmission>>;

    /// One page of summaries plus the total matching the filters.
    async fn list(&self, query: &SubmissionQuery) -> StoreResult<(Vec<SubmissionSummary>, i64)>;

    async fn update_status(
        &self,
        id: SubmissionId,
        input: &UpdateSubmissionStatus,
    ) -> StoreResult<Option<FormSubmission>>;

    async fn health_check(&self) -> bool;
}

/// Append-only audit log of validation attempts.
#[async_trait]
pub trait ValidationLogStore: Send + Sync {
    async fn record(&self, entry: CreateValidationLog) -> StoreResult<()>;

    async fn record_many(&self, entries: Vec<CreateValidationLog>) -> StoreResult<()>;

    async fn field_stats(&self) -> StoreResult<BTreeMap<String, FieldStats>>;

    /// Entries for `field_name` (case-insensitive), newest first, plus the total.
    async fn history(
        &self,
        field_name: &str,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<ValidationLog>, i64)>;
}

/// PostgreSQL-backed implementation of both store traits.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn create(
        &self,
        form: &SubmissionForm,
        logs: Vec<CreateValidationLog>,
    ) -> StoreResult<FormSubmission> {
        if self
            .find_active_by_identity(&form.aadhaar_number, &form.pan_number)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict(DUPLICATE_SUBMISSION.to_string()));
        }

        let mut tx = self.pool.begin().await?;
        // The partial unique indexes catch a concurrent insert that slipped
        // past the check above.
        let submission = SubmissionRepo::insert(&mut *tx, uuid::Uuid::now_v7(), form)
            .await
            .map_err(|e| classify_unique_violation(e, DUPLICATE_SUBMISSION))?;
        for log in &logs {
            ValidationLogRepo::insert(&mut *tx, log, Some(submission.id)).await?;
        }
        tx.commit().await?;

        Ok(submission)
    }

    async fn find_by_id(&self, id: SubmissionId) -> StoreResult<Option<SubmissionDetail>> {
        let Some(submission) = SubmissionRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let validation_logs = ValidationLogRepo::list_by_submission(&self.pool, id).await?;
        Ok(Some(SubmissionDetail {
            submission,
            validation_logs,
        }))
    }

    async fn find_active_by_identity(
        &self,
        aadhaar_number: &str,
        pan_number: &str,
    ) -> StoreResult<Option<FormSubmission>> {
        Ok(SubmissionRepo::find_active_by_identity(&self.pool, aadhaar_number, pan_number).await?)
    }

    async fn list(&self, query: &SubmissionQuery) -> StoreResult<(Vec<SubmissionSummary>, i64)> {
        let (items, total) = tokio::try_join!(
            SubmissionRepo::list(&self.pool, query),
            SubmissionRepo::count(&self.pool, query),
        )?;
        Ok((items, total))
    }

    async fn update_status(
        &self,
        id: SubmissionId,
        input: &UpdateSubmissionStatus,
    ) -> StoreResult<Option<FormSubmission>> {
        // Reviving a rejected submission can collide with a newer active one.
        SubmissionRepo::update_status(&self.pool, id, input)
            .await
            .map_err(|e| classify_unique_violation(e, DUPLICATE_SUBMISSION))
    }

    async fn health_check(&self) -> bool {
        match crate::health_check(&self.pool).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}

#[async_trait]
impl ValidationLogStore for PgStore {
    async fn record(&self, entry: CreateValidationLog) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        ValidationLogRepo::insert(&mut *conn, &entry, None).await?;
        Ok(())
    }

    async fn record_many(&self, entries: Vec<CreateValidationLog>) -> StoreResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for entry in &entries {
            ValidationLogRepo::insert(&mut *tx, entry, None).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn field_stats(&self) -> StoreResult<BTreeMap<String, FieldStats>> {
        let rows = ValidationLogRepo::stats(&self.pool).await?;
        Ok(fold_stats(rows))
    }

    async fn history(
        &self,
        field_name: &str,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<ValidationLog>, i64)> {
        let (history, total) = tokio::try_join!(
            ValidationLogRepo::history(&self.pool, field_name, limit, offset),
            ValidationLogRepo::count_history(&self.pool, field_name),
        )?;
        Ok((history, total))
    }
}
