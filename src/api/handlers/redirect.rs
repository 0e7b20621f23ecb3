//! Handler for geo-targeted short link redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Static page served for unknown or inactive codes.
const NOT_FOUND_PAGE: &str = include_str!("../../../static/not_found.html");

/// Resolves a short code to its geo-targeted destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Extract the visitor IP (peer address, or proxy headers when trusted)
/// 2. Resolve the active link (cache-aside) and geolocate the visitor
/// 3. Pick the destination: first matching geo rule, base URL otherwise
/// 4. Return `301 Moved Permanently`; the visit is recorded in the background
///
/// # Responses
///
/// - **301** with `Location` on success
/// - **404** with a static HTML page when the code is unknown or the link is
///   inactive — no geolocation, no cache write, no visit record
/// - **500** with a generic JSON body on unexpected internal errors
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let ip = client_ip(&headers, addr, state.behind_proxy);

    match state.redirect.resolve(&code, &ip).await? {
        Some(resolved) => {
            debug!(
                code,
                link_id = resolved.link_id,
                url = %resolved.url,
                rule_id = resolved.rule_id,
                country = %resolved.location.country_code,
                "redirect resolved"
            );

            Ok((
                StatusCode::MOVED_PERMANENTLY,
                [(header::LOCATION, resolved.url)],
            )
                .into_response())
        }
        None => {
            debug!(code, "no active link for code");
            Ok((StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response())
        }
    }
}
