//! Handlers for single-field and batch validation, plus log statistics.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use udyam_core::pagination::{clamp_limit, clamp_offset, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use udyam_core::validation::{FieldKind, ValidationOutcome};
use udyam_db::models::validation_log::{CreateValidationLog, FieldStats, ValidationLog};
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::handlers::{extract_json, record_validation_log, record_validation_logs};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Step reported when the client omits one.
const DEFAULT_STEP: &str = "1";

fn validate_step(step: &str) -> Result<(), ValidationError> {
    match step {
        "1" | "2" => Ok(()),
        _ => Err(ValidationError::new("step").with_message("step must be \"1\" or \"2\"".into())),
    }
}

/// Accept the step as either `"1"` or `1`.
fn step_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStep {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawStep>::deserialize(deserializer)?.map(|raw| match raw {
        RawStep::Text(s) => s,
        RawStep::Number(n) => n.to_string(),
    }))
}

// ── Request / response types ────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateFieldRequest {
    #[validate(length(min = 1, message = "field_name is required"))]
    pub field_name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, deserialize_with = "step_string_or_number")]
    #[validate(custom(function = "validate_step"))]
    pub step: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldInput {
    pub field_name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateMultipleRequest {
    #[validate(length(min = 1, message = "at least one field is required"))]
    pub fields: Vec<FieldInput>,
    #[serde(default, deserialize_with = "step_string_or_number")]
    #[validate(custom(function = "validate_step"))]
    pub step: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FieldResult {
    pub field_name: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FieldResult {
    fn new(field_name: &str, outcome: &ValidationOutcome) -> Self {
        Self {
            field_name: field_name.to_string(),
            is_valid: outcome.is_valid(),
            error_message: outcome.error_message().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidateFieldResponse {
    #[serde(flatten)]
    pub result: FieldResult,
    pub step: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateMultipleResponse {
    pub overall_valid: bool,
    pub results: Vec<FieldResult>,
    pub step: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub field_name: String,
    pub history: Vec<ValidationLog>,
    pub total: i64,
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /api/validate/field
///
/// Validate one value against the named field's rule and log the attempt.
pub async fn validate_field(
    State(state): State<AppState>,
    body: Result<Json<ValidateFieldRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ValidateFieldResponse>>> {
    let input = extract_json(body)?;
    input.validate()?;
    let kind: FieldKind = input.field_name.parse()?;

    let outcome = state.validator.validate(kind, &input.value);
    record_validation_log(
        &state,
        CreateValidationLog::from_outcome(&input.field_name, &input.value, kind.label(), &outcome),
    )
    .await;

    Ok(Json(DataResponse {
        data: ValidateFieldResponse {
            result: FieldResult::new(&input.field_name, &outcome),
            step: input.step.unwrap_or_else(|| DEFAULT_STEP.to_string()),
        },
    }))
}

/// POST /api/validate/multiple
///
/// Validate several values in order. Unknown field names are reported as
/// invalid results and are not logged.
pub async fn validate_multiple(
    State(state): State<AppState>,
    body: Result<Json<ValidateMultipleRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ValidateMultipleResponse>>> {
    let input = extract_json(body)?;
    input.validate()?;

    let mut results = Vec::with_capacity(input.fields.len());
    let mut logs = Vec::with_capacity(input.fields.len());
    for field in &input.fields {
        match field.field_name.parse::<FieldKind>() {
            Ok(kind) => {
                let outcome = state.validator.validate(kind, &field.value);
                logs.push(CreateValidationLog::from_outcome(
                    &field.field_name,
                    &field.value,
                    kind.label(),
                    &outcome,
                ));
                results.push(FieldResult::new(&field.field_name, &outcome));
            }
            Err(unknown) => {
                let outcome = ValidationOutcome::invalid(unknown.to_string());
                results.push(FieldResult::new(&field.field_name, &outcome));
            }
        }
    }
    record_validation_logs(&state, logs).await;

    let overall_valid = results.iter().all(|r| r.is_valid);
    Ok(Json(DataResponse {
        data: ValidateMultipleResponse {
            overall_valid,
            results,
            step: input.step.unwrap_or_else(|| DEFAULT_STEP.to_string()),
        },
    }))
}

/// GET /api/validate/stats
pub async fn validation_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<BTreeMap<String, FieldStats>>>> {
    let stats = state.validation_logs.field_stats().await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/validate/history/{field_name}
pub async fn validation_history(
    State(state): State<AppState>,
    Path(field_name): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<HistoryResponse>>> {
    let limit = clamp_limit(params.limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
    let offset = clamp_offset(params.offset);
    let (history, total) = state
        .validation_logs
        .history(&field_name, limit, offset)
        .await?;
    Ok(Json(DataResponse {
        data: HistoryResponse {
            field_name,
            history,
            total,
        },
    }))
}
