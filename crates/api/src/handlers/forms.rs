//! Handlers for registration form submission and review.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use udyam_core::error::CoreError;
use udyam_core::pagination::{
    clamp_limit, clamp_page, page_offset, PageInfo, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use udyam_core::submission::{validate_form, SubmissionForm, SubmissionStatus};
use udyam_core::types::{SubmissionId, Timestamp};
use udyam_db::models::submission::{
    FormSubmission, SubmissionDetail, SubmissionQuery, SubmissionSummary, UpdateSubmissionStatus,
};
use udyam_db::models::validation_log::CreateValidationLog;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::extract_json;
use crate::query::ListFormsParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Notes recorded on a soft-deleted submission.
const DELETED_NOTES: &str = "Form submission deleted";

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub id: SubmissionId,
    pub status: SubmissionStatus,
    pub submitted_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct SubmissionPage {
    pub submissions: Vec<SubmissionSummary>,
    pub pagination: PageInfo,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    pub notes: Option<String>,
}

fn not_found(id: SubmissionId) -> CoreError {
    CoreError::NotFound {
        entity: "Form submission",
        id: id.to_string(),
    }
}

/// POST /api/forms/submit
///
/// Validates every field, then stores the normalized form as `PENDING`
/// together with one validation log per field.
pub async fn submit_form(
    State(state): State<AppState>,
    body: Result<Json<SubmissionForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitResponse>>)> {
    let form = extract_json(body)?;
    let checks = validate_form(&state.validator, &form)?;

    let logs = checks
        .iter()
        .map(|c| CreateValidationLog::from_outcome(c.field, &c.value, c.kind.label(), &c.outcome))
        .collect();
    let submission = state.submissions.create(&form.normalized(), logs).await?;

    tracing::info!(
        submission_id = %submission.id,
        business_type = %submission.business_type,
        "Form submission created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitResponse {
                id: submission.id,
                status: submission.status,
                submitted_at: submission.created_at,
            },
        }),
    ))
}

/// GET /api/forms/{id}
pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<SubmissionId>,
) -> AppResult<Json<DataResponse<SubmissionDetail>>> {
    let detail = state
        .submissions
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/forms
pub async fn list_forms(
    State(state): State<AppState>,
    Query(params): Query<ListFormsParams>,
) -> AppResult<Json<DataResponse<SubmissionPage>>> {
    let page = clamp_page(params.page);
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<SubmissionStatus>)
        .transpose()?;

    let query = SubmissionQuery {
        status,
        search: params.search,
        limit,
        offset: page_offset(page, limit),
    };
    let (submissions, total) = state.submissions.list(&query).await?;

    Ok(Json(DataResponse {
        data: SubmissionPage {
            submissions,
            pagination: PageInfo::new(page, limit, total),
        },
    }))
}

/// PUT /api/forms/{id}/status
pub async fn update_form_status(
    State(state): State<AppState>,
    Path(id): Path<SubmissionId>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<FormSubmission>>> {
    let input = extract_json(body)?;
    input.validate()?;
    let status: SubmissionStatus = input.status.trim().parse()?;
    let notes = input.notes.filter(|n| !n.trim().is_empty());

    let updated = set_status(&state, id, status, notes).await?;
    tracing::info!(submission_id = %id, status = %status, "Form status updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/forms/{id}
///
/// Soft delete: the submission is marked `REJECTED`, which also releases its
/// Aadhaar and PAN for a new submission.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<SubmissionId>,
) -> AppResult<Json<DataResponse<FormSubmission>>> {
    let updated = set_status(
        &state,
        id,
        SubmissionStatus::Rejected,
        Some(DELETED_NOTES.to_string()),
    )
    .await?;
    tracing::info!(submission_id = %id, "Form submission deleted");
    Ok(Json(DataResponse { data: updated }))
}

async fn set_status(
    state: &AppState,
    id: SubmissionId,
    status: SubmissionStatus,
    notes: Option<String>,
) -> AppResult<FormSubmission> {
    let input = UpdateSubmissionStatus { status, notes };
    let updated = state
        .submissions
        .update_status(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(updated)
}
