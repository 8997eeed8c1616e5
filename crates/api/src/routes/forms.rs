//! Route definitions for form submissions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /                -> list_forms (?page, limit, status, search)
/// POST   /submit          -> submit_form
/// GET    /{id}            -> get_form
/// DELETE /{id}            -> delete_form
/// PUT    /{id}/status     -> update_form_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(forms::list_forms))
        .route("/submit", post(forms::submit_form))
        .route("/{id}", get(forms::get_form).delete(forms::delete_form))
        .route("/{id}/status", put(forms::update_form_status))
}
