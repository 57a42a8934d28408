//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into lifecycle operations and formats
//! responses as JSON.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication and tracing middleware
//! - [`openapi`] - OpenAPI document and Swagger UI
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
