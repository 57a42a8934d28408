//! OpenAPI document for the HTTP API.
//!
//! Served as JSON at [`OPENAPI_JSON_PATH`], with Swagger UI under
//! [`SWAGGER_UI_PATH`] (`/swagger/index.html`).

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::api::dto::link::{LinkRequest, LinkResponse, MessageResponse};
use crate::api::handlers::{health, links, visit};
use crate::error::{ErrorBody, ErrorInfo};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(title = "Link Lifecycle API"),
    paths(
        links::create_link_handler,
        links::get_link_handler,
        links::update_link_handler,
        links::delete_link_handler,
        visit::visit_link_handler,
        health::health_handler,
    ),
    components(schemas(
        LinkRequest,
        LinkResponse,
        MessageResponse,
        ErrorBody,
        ErrorInfo,
        HealthResponse,
        HealthChecks,
        CheckStatus,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "links", description = "Link management, bearer token required"),
        (name = "visits", description = "Public visit counting"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the `/links*` operations.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// Swagger UI plus the JSON document, mergeable into any router.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
