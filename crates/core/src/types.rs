/// Submissions are keyed by time-ordered UUIDs (v7) generated by the service.
pub type SubmissionId = uuid::Uuid;

/// Validation log rows use PostgreSQL BIGSERIAL keys.
pub type LogId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
