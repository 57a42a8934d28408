//! DTOs for `GET /health`.

use serde::Serialize;
use utoipa::ToSchema;

/// Overall service health plus per-dependency results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` when every check passed, `degraded` otherwise.
    #[schema(value_type = String, example = "healthy")]
    pub status: &'static str,
    #[schema(value_type = String)]
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    pub fn from_checks(checks: HealthChecks) -> Self {
        Self {
            status: if checks.all_ok() { "healthy" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.checks.all_ok()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

impl HealthChecks {
    fn all_ok(&self) -> bool {
        self.database.is_ok()
    }
}

/// Result of probing one dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckStatus {
    #[schema(value_type = String, example = "ok")]
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok",
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
