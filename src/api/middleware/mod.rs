//! HTTP middleware for request processing.
//!
//! Provides the bearer presence check and request tracing.

pub mod auth;
pub mod tracing;
