pub mod forms;
pub mod health;
pub mod locations;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /validate/field                          validate one field (POST)
/// /validate/multiple                       validate several fields (POST)
/// /validate/stats                          valid/invalid counts per field
/// /validate/history/{field_name}           validation history for a field
///
/// /forms                                   list submissions
/// /forms/submit                            submit a form (POST)
/// /forms/{id}                              get, soft delete
/// /forms/{id}/status                       update status (PUT)
///
/// /locations/pincode/{pincode}             look up a PIN code
/// /locations/cities/search                 search cities and states (?q=)
/// /locations/states                        list states
/// /locations/states/{state}/cities         cities in a state
/// /locations/popular                       popular PIN codes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/validate", validation::router())
        .nest("/forms", forms::router())
        .nest("/locations", locations::router())
}
