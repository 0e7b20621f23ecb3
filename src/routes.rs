//! Route configuration for the redirect service.

use axum::{Router, routing::get};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware;
use crate::state::AppState;

/// Builds the application router.
///
/// # Routes
///
/// - `GET /health` - component health checks
/// - `GET /{code}` - geo-targeted redirect
///
/// Trailing slashes are normalized so `/abc/` resolves like `/abc`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .layer(middleware::tracing::layer())
        .with_state(state);

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
