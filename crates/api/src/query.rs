//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Page-based listing parameters (`?page=&limit=&status=&search=`).
#[derive(Debug, Deserialize)]
pub struct ListFormsParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// City search parameters (`?q=`).
#[derive(Debug, Deserialize)]
pub struct CitySearchParams {
    #[serde(default)]
    pub q: String,
}
