//! Health check endpoint.

use axum::Json;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::api::rfc3339;

/// Tag for OpenAPI documentation.
pub const MISC_TAG: &str = "Miscellaneous";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    /// Current server time, RFC 3339.
    pub timestamp: String,
}

/// Health check endpoint. Never gated by the blocklist.
#[tracing::instrument()]
#[utoipa::path(
    get,
    path = "/health",
    tag = MISC_TAG,
    operation_id = "Health Check",
    summary = "Service health check",
    description = "Returns `healthy` and the current server time. \
                   This endpoint bypasses the IP blocklist so load balancers keep working.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthStatus)
    )
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: rfc3339(OffsetDateTime::now_utc()),
    })
}
