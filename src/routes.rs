//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check (public)
//! - `GET  /visit/{id}`  - Visit a link (public)
//! - `/links*`           - Link management (Bearer token required)
//! - `GET  /swagger/*`   - Swagger UI, document at `/api-docs/openapi.json` (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token presence on `/links*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, tracing};
use crate::api::openapi::swagger_ui;
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path
/// normalization.
pub fn router(state: AppState) -> Router {
    let protected =
        api::routes::protected_routes().route_layer(middleware::from_fn(auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::public_routes())
        .merge(protected)
        .merge(swagger_ui())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
