//! HTTP API.
//!
//! All routes live under `/api`:
//! - `health` - liveness probe (`/api/health`), never gated
//! - `visits` - visit logging and the recent-visits window
//! - `admins` - Telegram admin registry
//! - `blocklist` - IP blocklist management
//! - `guard` - blocklist middleware in front of every route
//! - `openapi` - OpenAPI/Utoipa configuration, served at `/api-docs`

pub mod admins;
pub mod blocklist;
pub mod guard;
pub mod health;
pub mod openapi;
pub mod visits;

use axum::{
    Extension, Router,
    http::{HeaderValue, header},
    middleware,
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_redoc::{Redoc, Servable};

use crate::{AppResources, config::AppConfig};

/// `{"message": "..."}` confirmation body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Format a timestamp as RFC 3339, the wire format of every timestamp field.
pub fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

fn api_routes() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(health::health))
        .routes(routes!(visits::log_visit))
        .routes(routes!(visits::list_visits))
        .routes(routes!(admins::list_admins, admins::create_admin))
        .routes(routes!(admins::delete_admin))
        .routes(routes!(blocklist::block_ip))
        .routes(routes!(blocklist::unblock_ip))
        .routes(routes!(blocklist::list_blocked_ips))
}

/// CORS policy from `cors_origins`: `*` is fully permissive, anything else is
/// a single origin allowed with credentials.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_allows_any_origin() {
        // Credentials stay off: browsers refuse them alongside a wildcard origin.
        return CorsLayer::permissive();
    }
    match HeaderValue::from_str(config.cors_origins.trim()) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
            .expose_headers([header::CONTENT_TYPE]),
        Err(e) => {
            // validate() rejects this at startup; fall back to same-origin only.
            tracing::error!(error = %e, origin = %config.cors_origins, "Invalid CORS origin");
            CorsLayer::new()
        }
    }
}

/// Build the full application router: `/api` routes, the blocklist guard,
/// OpenAPI docs, CORS and request tracing.
pub fn router(resources: AppResources) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(openapi::ApiDoc::openapi())
        .nest("/api", api_routes())
        .split_for_parts();

    router
        .merge(Redoc::with_url("/api-docs", api))
        .layer(middleware::from_fn_with_state(
            resources.clone(),
            guard::block_listed_ips,
        ))
        .layer(cors_layer(&resources.config))
        .layer(Extension(resources))
        .layer(TraceLayer::new_for_http())
}

/// Starts the web server with all configured routes.
#[tracing::instrument(skip(app_resources))]
pub async fn start_webserver(app_resources: AppResources) -> color_eyre::Result<()> {
    let addr = app_resources.config.socket_addr()?;
    let router = router(app_resources);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .map_err(|e| color_eyre::Report::msg(format!("Failed to start server: {e}")))?;

    Ok(())
}
