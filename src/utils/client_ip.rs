//! Client IP extraction.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Determines the visitor IP for geolocation and visit logging.
///
/// When `behind_proxy` is set, `X-Forwarded-For` (first hop) and `X-Real-IP`
/// are consulted before the peer socket address. These headers are trivially
/// spoofable, so they are only honored when the service is explicitly
/// configured to run behind a trusted reverse proxy.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            if let Some(first) = forwarded.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }

        if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
            let real_ip = real_ip.trim();
            if !real_ip.is_empty() {
                return real_ip.to_string();
            }
        }
    }

    peer.ip().to_string()
}
