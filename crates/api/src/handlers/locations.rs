//! Handlers for the static postal-code directory.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use udyam_core::error::CoreError;
use udyam_core::location::{CityEntry, Location, MAX_SEARCH_RESULTS};
use udyam_core::validation::{FieldKind, ValidationOutcome};
use udyam_db::models::validation_log::{CreateValidationLog, PINCODE_LOOKUP};

use crate::error::{AppError, AppResult};
use crate::handlers::record_validation_log;
use crate::query::CitySearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum query length for city search.
const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Serialize)]
pub struct CitySearchResponse {
    pub query: String,
    pub results: Vec<Location>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct StatesResponse {
    pub states: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct StateCitiesResponse {
    pub state: String,
    pub cities: Vec<CityEntry>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct PopularResponse {
    pub popular_pincodes: Vec<Location>,
    pub total: usize,
}

/// GET /api/locations/pincode/{pincode}
///
/// Every lookup is logged under `pincode_lookup`, whether or not it matched.
pub async fn lookup_pincode(
    State(state): State<AppState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<DataResponse<Location>>> {
    let normalized = FieldKind::Pincode.normalize(&pincode);
    if normalized.len() != 6 || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "PIN code must be exactly 6 digits".to_string(),
        ));
    }

    let found = state.locations.lookup(&normalized).cloned();
    let outcome = match &found {
        Some(_) => ValidationOutcome::valid(),
        None => ValidationOutcome::invalid("PIN code not found"),
    };
    record_validation_log(
        &state,
        CreateValidationLog::from_outcome(PINCODE_LOOKUP, &normalized, PINCODE_LOOKUP, &outcome),
    )
    .await;

    let location = found.ok_or_else(|| CoreError::NotFound {
        entity: "Location",
        id: normalized,
    })?;
    Ok(Json(DataResponse { data: location }))
}

/// GET /api/locations/cities/search?q=
pub async fn search_cities(
    State(state): State<AppState>,
    Query(params): Query<CitySearchParams>,
) -> AppResult<Json<DataResponse<CitySearchResponse>>> {
    let query = params.q.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Err(AppError::BadRequest(format!(
            "Search query must be at least {MIN_QUERY_LEN} characters"
        )));
    }

    let results: Vec<Location> = state
        .locations
        .search(&query, MAX_SEARCH_RESULTS)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse {
        data: CitySearchResponse {
            query,
            total: results.len(),
            results,
        },
    }))
}

/// GET /api/locations/states
pub async fn list_states(State(state): State<AppState>) -> Json<DataResponse<StatesResponse>> {
    let states: Vec<String> = state
        .locations
        .states()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(DataResponse {
        data: StatesResponse {
            total: states.len(),
            states,
        },
    })
}

/// GET /api/locations/states/{state}/cities
pub async fn list_cities_in_state(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
) -> Json<DataResponse<StateCitiesResponse>> {
    let cities = state.locations.cities_in_state(&state_name);
    Json(DataResponse {
        data: StateCitiesResponse {
            state: state_name,
            total: cities.len(),
            cities,
        },
    })
}

/// GET /api/locations/popular
pub async fn popular_pincodes(State(state): State<AppState>) -> Json<DataResponse<PopularResponse>> {
    let popular = state.locations.popular().to_vec();
    Json(DataResponse {
        data: PopularResponse {
            total: popular.len(),
            popular_pincodes: popular,
        },
    })
}
