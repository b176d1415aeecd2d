//! Caller IP resolution shared by the blocklist guard and visit logging.

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use std::{convert::Infallible, net::SocketAddr};

pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Placeholder used when neither a forwarded header nor a peer address is known.
pub const UNKNOWN_IP: &str = "unknown";

/// First entry of `X-Forwarded-For` if the header is non-empty, else the peer
/// address, else [`UNKNOWN_IP`]. The forwarded value is not validated.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty());

    if let Some(value) = forwarded {
        return value.split(',').next().unwrap_or_default().trim().to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Peer address, present when served with `into_make_service_with_connect_info`.
pub fn peer_addr(extensions: &axum::http::Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

/// Extractor yielding the resolved caller IP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp(resolve_client_ip(
            &parts.headers,
            peer_addr(&parts.extensions),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn forwarded_header_wins_over_peer() {
        let peer: SocketAddr = "192.0.2.1:4000".parse().unwrap();
        let ip = resolve_client_ip(&headers_with("203.0.113.7, 10.0.0.1"), Some(peer));
        assert_eq!(ip, "203.0.113.7");
    }

    #[test]
    fn forwarded_entry_is_trimmed() {
        let ip = resolve_client_ip(&headers_with("  198.51.100.4 ,10.0.0.1"), None);
        assert_eq!(ip, "198.51.100.4");
    }

    #[test]
    fn empty_forwarded_header_falls_back_to_peer() {
        let peer: SocketAddr = "192.0.2.1:4000".parse().unwrap();
        assert_eq!(resolve_client_ip(&headers_with(""), Some(peer)), "192.0.2.1");
    }

    #[test]
    fn ipv6_peer_is_rendered_without_port() {
        let peer: SocketAddr = "[2001:db8::1]:443".parse().unwrap();
        assert_eq!(resolve_client_ip(&HeaderMap::new(), Some(peer)), "2001:db8::1");
    }

    #[test]
    fn nothing_known_yields_placeholder() {
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None), UNKNOWN_IP);
    }
}
