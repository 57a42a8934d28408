//! Bearer token presence check.

use axum::{
    extract::{FromRequestParts, Request},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::error::AppError;

/// Rejects requests without a non-empty bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// Only presence is checked: any non-empty token after the `Bearer ` prefix
/// is accepted. No signature, expiry, or identity is verified.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header
/// is missing, uses another scheme, or carries an empty token.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/links/{id}", get(get_link_handler))
///     .route_layer(middleware::from_fn(auth::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    if token.trim().is_empty() {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Bearer token is empty" }),
        ));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
