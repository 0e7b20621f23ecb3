//! Shared application state for HTTP handlers.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::RedirectService;
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::cache::CacheService;

/// Shared state injected into every request handler.
///
/// Cloning is cheap: the pool and channel sender are handles, the rest
/// are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Database pool, used directly only by the health check.
    pub db: PgPool,
    /// Fast cache backend, exposed for health checks.
    pub cache: Arc<dyn CacheService>,
    /// Redirect resolution pipeline.
    pub redirect: Arc<RedirectService>,
    /// Sender side of the visit queue, exposed for health checks.
    pub visit_tx: mpsc::Sender<VisitEvent>,
    /// Whether proxy headers are trusted for client IP extraction.
    pub behind_proxy: bool,
}
