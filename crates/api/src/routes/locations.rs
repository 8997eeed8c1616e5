//! Route definitions for the postal-code directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET    /pincode/{pincode}          -> lookup_pincode
/// GET    /cities/search              -> search_cities (?q)
/// GET    /states                     -> list_states
/// GET    /states/{state}/cities      -> list_cities_in_state
/// GET    /popular                    -> popular_pincodes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pincode/{pincode}", get(locations::lookup_pincode))
        .route("/cities/search", get(locations::search_cities))
        .route("/states", get(locations::list_states))
        .route("/states/{state}/cities", get(locations::list_cities_in_state))
        .route("/popular", get(locations::popular_pincodes))
}
