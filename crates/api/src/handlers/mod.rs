pub mod forms;
pub mod locations;
pub mod validation;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use udyam_db::models::validation_log::CreateValidationLog;

use crate::error::AppError;
use crate::state::AppState;

/// Unwrap a JSON body, turning a rejection into a JSON error response.
pub(crate) fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(value)| value).map_err(AppError::from)
}

// Log writes never change the response: a failed write is reported at
// `warn` and otherwise ignored.

/// Append one entry to the validation log.
pub(crate) async fn record_validation_log(state: &AppState, entry: CreateValidationLog) {
    let field_name = entry.field_name.clone();
    if let Err(e) = state.validation_logs.record(entry).await {
        tracing::warn!(error = %e, field_name = %field_name, "Failed to record validation log");
    }
}

/// Append several entries to the validation log.
pub(crate) async fn record_validation_logs(state: &AppState, entries: Vec<CreateValidationLog>) {
    if entries.is_empty() {
        return;
    }
    let count = entries.len();
    if let Err(e) = state.validation_logs.record_many(entries).await {
        tracing::warn!(error = %e, count, "Failed to record validation logs");
    }
}
