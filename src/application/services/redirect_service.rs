//! Redirect resolution: cached link lookup, rule matching, visit dispatch.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::application::services::GeoService;
use crate::domain::entities::{GeoLocation, Link};
use crate::domain::repositories::LinkRepository;
use crate::domain::rule_matcher::select_redirect;
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Outcome of a successful redirect resolution.
#[derive(Debug, Clone)]
pub struct ResolvedRedirect {
    pub link_id: i64,
    /// Destination URL, always scheme-qualified.
    pub url: String,
    /// Matched rule, or `None` when the base URL was used.
    pub rule_id: Option<i64>,
    pub location: GeoLocation,
}

/// Orchestrates the redirect path.
///
/// 1. Active-link lookup via cache-aside (`link:{code}`, Postgres fallback)
/// 2. Visitor geolocation via [`GeoService`] (never fails)
/// 3. First-match-wins rule selection against the link's stored rule order
/// 4. Visit event enqueued for the background worker
///
/// Not-found results are never cached, so a link created right after a failed
/// lookup is visible on the next request.
pub struct RedirectService {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    geo: Arc<GeoService>,
    visit_tx: mpsc::Sender<VisitEvent>,
    link_cache_ttl_seconds: u64,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        geo: Arc<GeoService>,
        visit_tx: mpsc::Sender<VisitEvent>,
        link_cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            links,
            cache,
            geo,
            visit_tx,
            link_cache_ttl_seconds,
        }
    }

    /// Resolves a short code and visitor IP to a redirect destination.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ResolvedRedirect))` with the destination URL; the matching
    ///   visit event has already been enqueued
    /// - `Ok(None)` when no active link carries this code — the caller
    ///   responds 404 and nothing is written anywhere
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only on database failure during the
    /// link lookup; geolocation and rule matching cannot fail.
    pub async fn resolve(
        &self,
        code: &str,
        ip: &str,
    ) -> Result<Option<ResolvedRedirect>, AppError> {
        let link = match self.lookup_active_link(code).await? {
            Some(link) => link,
            None => return Ok(None),
        };

        let location = self.geo.resolve_location(ip).await;

        let (url, rule_id) = select_redirect(&link.rules, &location.country_code, &link.base_url);

        // Fire and forget: the redirect must not wait for, or fail with,
        // visit persistence.
        let event = VisitEvent {
            link_id: link.id,
            ip: ip.to_string(),
            country: location.country_code.clone(),
            city: location.city.clone(),
            rule_id,
        };
        if let Err(e) = self.visit_tx.try_send(event) {
            warn!(link_id = link.id, error = %e, "failed to enqueue visit event");
        }

        Ok(Some(ResolvedRedirect {
            link_id: link.id,
            url,
            rule_id,
            location,
        }))
    }

    /// Cache-aside lookup of an active link by short code.
    async fn lookup_active_link(&self, code: &str) -> Result<Option<Link>, AppError> {
        let cache_key = format!("link:{code}");

        match self.cache.get(&cache_key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Link>(&raw) {
                Ok(link) => {
                    debug!(code, "link cache hit");
                    return Ok(Some(link));
                }
                Err(e) => {
                    warn!(code, error = %e, "corrupt link cache entry");
                }
            },
            Ok(None) => {}
            Err(e) => {
                error!(code, error = %e, "link cache read failed, falling back to database");
            }
        }

        let link = self.links.find_active_by_code(code).await?;

        if let Some(link) = &link {
            match serde_json::to_string(link) {
                Ok(raw) => {
                    let _ = self
                        .cache
                        .set(&cache_key, &raw, Some(self.link_cache_ttl_seconds))
                        .await;
                }
                Err(e) => warn!(code, error = %e, "failed to serialize link for cache"),
            }
        }

        Ok(link)
    }
}
