//! Handlers for link management endpoints (create, read, update, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::link::{LinkRequest, LinkResponse, MessageResponse};
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Unwraps a JSON body, turning any rejection into a 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// { "title": "Docs", "url": "https://example.com", "expiresAt": "2026-12-31T23:59:59Z" }
/// ```
///
/// `createdAt` is set by the server and `clicks` always starts at 0.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed.
/// Returns 500 Internal Server Error if the store fails.
#[utoipa::path(
    post,
    path = "/links",
    tag = "links",
    request_body = LinkRequest,
    responses(
        (status = 201, description = "Link created", body = LinkResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<LinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let request = json_body(payload)?;
    let cancel = state.request_cancellation();

    let link = state
        .link_service
        .create_link(&cancel, request.into_draft())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Returns a link by id.
///
/// # Endpoint
///
/// `GET /links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist.
#[utoipa::path(
    get,
    path = "/links/{id}",
    tag = "links",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 200, description = "Link found", body = LinkResponse),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 404, description = "Link not found", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let cancel = state.request_cancellation();
    let link = state.link_service.get_link(&cancel, &id).await?;

    Ok(Json(link.into()))
}

/// Replaces title, url and expiry of a link.
///
/// # Endpoint
///
/// `PUT /links/{id}`
///
/// The id from the path wins over any `id` in the body. A `clicks` value in
/// the body is ignored; the stored counter is returned unchanged.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed.
/// Returns 404 Not Found if the link does not exist.
#[utoipa::path(
    put,
    path = "/links/{id}",
    tag = "links",
    params(("id" = String, Path, description = "Link id")),
    request_body = LinkRequest,
    responses(
        (status = 200, description = "Link updated", body = LinkResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 404, description = "Link not found", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<LinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let request = json_body(payload)?;
    let cancel = state.request_cancellation();

    let link = state
        .link_service
        .update_link(&cancel, request.into_update(id))
        .await?;

    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /links/{id}`
///
/// Recorded visits of the link are kept.
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist.
#[utoipa::path(
    delete,
    path = "/links/{id}",
    tag = "links",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 200, description = "Link deleted", body = MessageResponse),
        (status = 401, description = "Missing bearer token", body = ErrorBody),
        (status = 404, description = "Link not found", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let cancel = state.request_cancellation();
    state.link_service.delete_link(&cancel, &id).await?;

    Ok(Json(MessageResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
