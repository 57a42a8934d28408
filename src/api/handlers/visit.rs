//! Handler for the public visit endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::LinkResponse;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Counts a visit and returns the link with its incremented counter.
///
/// # Endpoint
///
/// `GET /visit/{id}`
///
/// Public: no bearer token required.
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist (nothing is recorded).
/// Returns 500 Internal Server Error if the visit could not be logged; the
/// click still counts.
#[utoipa::path(
    get,
    path = "/visit/{id}",
    tag = "visits",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 200, description = "Visit counted", body = LinkResponse),
        (status = 404, description = "Link not found", body = ErrorBody),
    )
)]
pub async fn visit_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let cancel = state.request_cancellation();
    let link = state.link_service.visit_link(&cancel, &id).await?;

    Ok(Json(link.into()))
}
