//! IP geolocation with two cache tiers and an external fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::entities::{GeoCacheEntry, GeoLocation};
use crate::domain::repositories::GeoCacheRepository;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::geoip::GeoIpProvider;

/// Durable cache entries live for a week; repeat visitors within that window
/// never trigger an external lookup.
const DURABLE_TTL_DAYS: i64 = 7;

/// Resolves visitor IPs to locations.
///
/// Lookup order:
///
/// 1. Fast cache (`geolocation:{ip}`), short TTL, no external I/O
/// 2. Durable cache (`ip_geo_cache` table), week-long TTL, survives restarts
/// 3. External provider, bounded by a hard timeout
///
/// [`GeoService::resolve_location`] never fails: any error along the way
/// degrades to [`GeoLocation::unknown`]. Failures are never cached, so a
/// failed lookup is retried on the very next request for that IP.
pub struct GeoService {
    cache: Arc<dyn CacheService>,
    durable: Arc<dyn GeoCacheRepository>,
    provider: Arc<dyn GeoIpProvider>,
    fast_ttl_seconds: u64,
    lookup_timeout: Duration,
}

impl GeoService {
    /// Creates a new geolocation service.
    ///
    /// # Arguments
    ///
    /// - `cache` - Fast tier (`GEO_FAST_TTL_SECONDS` controls `fast_ttl_seconds`)
    /// - `durable` - Durable tier, refreshed on every successful external lookup
    /// - `provider` - External IP-intelligence lookup
    /// - `lookup_timeout` - Hard deadline for one external call
    pub fn new(
        cache: Arc<dyn CacheService>,
        durable: Arc<dyn GeoCacheRepository>,
        provider: Arc<dyn GeoIpProvider>,
        fast_ttl_seconds: u64,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            durable,
            provider,
            fast_ttl_seconds,
            lookup_timeout,
        }
    }

    /// Resolves an IP to a location. Never fails.
    ///
    /// Empty or unparseable IPs still go through the full pipeline; the
    /// provider decides what it can answer. On any failure the
    /// unknown-location sentinel is returned, which by construction cannot
    /// match a geo rule.
    pub async fn resolve_location(&self, ip: &str) -> GeoLocation {
        let cache_key = format!("geolocation:{ip}");

        if let Some(location) = self.fast_tier(&cache_key).await {
            return location;
        }

        if let Some(location) = self.durable_tier(ip, &cache_key).await {
            return location;
        }

        self.external_lookup(ip, &cache_key).await
    }

    async fn fast_tier(&self, cache_key: &str) -> Option<GeoLocation> {
        match self.cache.get(cache_key).await {
            Ok(Some(raw)) => match serde_json::from_str::<GeoLocation>(&raw) {
                Ok(location) => {
                    debug!(key = cache_key, "geolocation fast-cache hit");
                    Some(location)
                }
                Err(e) => {
                    warn!(key = cache_key, error = %e, "corrupt geolocation cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = cache_key, error = %e, "geolocation fast-cache read failed");
                None
            }
        }
    }

    async fn durable_tier(&self, ip: &str, cache_key: &str) -> Option<GeoLocation> {
        match self.durable.find_by_ip(ip).await {
            Ok(Some(entry)) if !entry.is_expired() => {
                debug!(ip, "geolocation durable-cache hit");
                let location = entry.location();
                self.store_fast(cache_key, &location).await;
                Some(location)
            }
            // Expired rows stay in place; the upsert after the next
            // successful lookup overwrites them.
            Ok(_) => None,
            Err(e) => {
                warn!(ip, error = %e, "geolocation durable-cache read failed");
                None
            }
        }
    }

    async fn external_lookup(&self, ip: &str, cache_key: &str) -> GeoLocation {
        let lookup = match tokio::time::timeout(self.lookup_timeout, self.provider.lookup(ip)).await
        {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(e)) => {
                warn!(ip, error = %e, "geolocation lookup failed");
                return GeoLocation::unknown();
            }
            Err(_) => {
                warn!(ip, timeout_ms = self.lookup_timeout.as_millis() as u64, "geolocation lookup timed out");
                return GeoLocation::unknown();
            }
        };

        let location = GeoLocation {
            country_code: lookup.country_code,
            city: lookup.city,
        };

        // Refresh the durable tier without blocking the request.
        let durable = self.durable.clone();
        let entry = GeoCacheEntry {
            ip: ip.to_string(),
            country_code: location.country_code.clone(),
            city: location.city.clone(),
            expires_at: Utc::now() + chrono::Duration::days(DURABLE_TTL_DAYS),
        };
        tokio::spawn(async move {
            if let Err(e) = durable.upsert(entry).await {
                warn!(error = %e, "failed to refresh durable geolocation cache");
            }
        });

        self.store_fast(cache_key, &location).await;

        location
    }

    async fn store_fast(&self, cache_key: &str, location: &GeoLocation) {
        match serde_json::to_string(location) {
            // Fail-open by contract; errors are already logged inside.
            Ok(raw) => {
                let _ = self
                    .cache
                    .set(cache_key, &raw, Some(self.fast_ttl_seconds))
                    .await;
            }
            Err(e) => warn!(error = %e, "failed to serialize geolocation for cache"),
        }
    }
}
