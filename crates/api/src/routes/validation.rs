//! Route definitions for field validation.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/validate`.
///
/// ```text
/// POST   /field                   -> validate_field
/// POST   /multiple                -> validate_multiple
/// GET    /stats                   -> validation_stats
/// GET    /history/{field_name}    -> validation_history (?limit, offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/field", post(validation::validate_field))
        .route("/multiple", post(validation::validate_multiple))
        .route("/stats", get(validation::validation_stats))
        .route("/history/{field_name}", get(validation::validation_history))
}
