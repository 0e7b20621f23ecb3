//! Repository trait for the durable geolocation cache.

use crate::domain::entities::GeoCacheEntry;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable fallback store for geolocation results (`ip_geo_cache`).
///
/// One row per IP with upsert semantics. Entries carry their own expiry;
/// staleness is checked by the caller, not enforced by the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgGeoCacheRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoCacheRepository: Send + Sync {
    /// Looks up the cached entry for an IP, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Callers degrade
    /// read failures to a cache miss.
    async fn find_by_ip(&self, ip: &str) -> Result<Option<GeoCacheEntry>, AppError>;

    /// Creates or refreshes the entry for `entry.ip`.
    ///
    /// Concurrent writers for the same IP are safe: last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Callers treat
    /// write failures as log-and-ignore.
    async fn upsert(&self, entry: GeoCacheEntry) -> Result<(), AppError>;
}
