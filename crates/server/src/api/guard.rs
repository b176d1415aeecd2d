//! Blocklist guard applied in front of every route.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    AppResources,
    api::blocklist::is_ip_blocked,
    client_ip::{peer_addr, resolve_client_ip},
    error::ApiError,
};

/// Prefix of every path the guard checks.
pub const GATED_PREFIX: &str = "/api/";
/// Exempt so health probes keep working for blocked load balancers.
pub const HEALTH_PATH: &str = "/api/health";

/// True for paths the blocklist applies to.
pub fn is_gated(path: &str) -> bool {
    path.starts_with(GATED_PREFIX) && path != HEALTH_PATH
}

/// Reject callers whose resolved IP is on the blocklist with 403
/// `{"detail": "IP address is blocked"}`; everything else passes through.
///
/// The lookup uses its own pooled connection, independent of the handler's.
pub async fn block_listed_ips(
    State(resources): State<AppResources>,
    request: Request,
    next: Next,
) -> Response {
    if !is_gated(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = resolve_client_ip(request.headers(), peer_addr(request.extensions()));
    match is_ip_blocked(resources.db.as_ref(), &ip).await {
        Ok(false) => next.run(request).await,
        Ok(true) => {
            tracing::warn!(
                name = "api.guard.blocked",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                ip = %ip,
                path = %request.uri().path(),
                message = "Rejected request from blocked IP"
            );
            ApiError::Forbidden("IP address is blocked".to_string()).into_response()
        }
        Err(e) => ApiError::Database(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_paths_are_gated() {
        assert!(is_gated("/api/visits"));
        assert!(is_gated("/api/log-visit"));
        assert!(is_gated("/api/admins/3"));
    }

    #[test]
    fn health_and_non_api_paths_pass() {
        assert!(!is_gated("/api/health"));
        assert!(!is_gated("/api-docs"));
        assert!(!is_gated("/"));
        assert!(!is_gated("/api"));
    }
}
