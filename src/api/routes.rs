//! API route configuration.
//!
//! Link management endpoints require a bearer token via
//! [`crate::api::middleware::auth`]. Visiting a link is public.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, update_link_handler,
    visit_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes, to be wrapped in bearer authentication.
///
/// # Endpoints
///
/// - `POST   /links`        - Create a link
/// - `GET    /links/{id}`   - Fetch a link
/// - `PUT    /links/{id}`   - Replace title, url and expiry
/// - `DELETE /links/{id}`   - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}

/// Routes reachable without credentials.
///
/// # Endpoints
///
/// - `GET /visit/{id}` - Count a visit and return the link
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/visit/{id}", get(visit_link_handler))
}
