//! Geolocation provider trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// A successful provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLookup {
    pub country_code: String,
    pub city: String,
}

/// Failures of the external geolocation lookup.
///
/// These never leave the geolocation resolver: every variant is converted to
/// the unknown-location sentinel before the redirect path continues.
#[derive(Debug, Error)]
pub enum GeoProviderError {
    #[error("geolocation lookup timed out")]
    Timeout,

    #[error("geolocation request failed: {0}")]
    Http(String),

    #[error("malformed geolocation response: {0}")]
    Malformed(String),
}

/// Third-party IP-intelligence lookup.
///
/// Network-bound and allowed to fail or hang; callers must bound it with a
/// timeout.
///
/// # Implementations
///
/// - [`crate::infrastructure::geoip::IpinfoProvider`] - ipinfo.io HTTP API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoIpProvider: Send + Sync {
    /// Resolves an IP to a country code and city.
    ///
    /// # Errors
    ///
    /// Returns [`GeoProviderError`] on network failure, timeout, or an
    /// unparseable response.
    async fn lookup(&self, ip: &str) -> Result<GeoLookup, GeoProviderError>;
}
