//! ipinfo.io implementation of the geolocation provider.

use super::provider::{GeoIpProvider, GeoLookup, GeoProviderError};
use crate::domain::entities::{UNKNOWN_CITY, UNKNOWN_COUNTRY};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://ipinfo.io";

/// Geolocation lookups against the ipinfo.io HTTP API.
///
/// The underlying client carries its own request timeout as a lower bound;
/// [`crate::application::services::GeoService`] additionally enforces the hard
/// per-lookup deadline.
pub struct IpinfoProvider {
    http: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpinfoResponse {
    country: Option<String>,
    city: Option<String>,
}

impl IpinfoResponse {
    /// Missing fields degrade to the sentinel values rather than failing the
    /// whole lookup; a partial answer is still cacheable.
    fn into_lookup(self) -> GeoLookup {
        GeoLookup {
            country_code: self
                .country
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
            city: self
                .city
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        }
    }
}

impl IpinfoProvider {
    /// Creates a provider with the given API token and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GeoProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(token: Option<String>, timeout: Duration) -> Result<Self, GeoProviderError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoProviderError::Http(e.to_string()))?;

        Ok(Self {
            http,
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL. Test hook.
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn lookup_url(&self, ip: &str) -> String {
        match &self.token {
            Some(token) => format!("{}/{}/json?token={}", self.base_url, ip, token),
            None => format!("{}/{}/json", self.base_url, ip),
        }
    }
}

fn map_request_error(e: reqwest::Error) -> GeoProviderError {
    if e.is_timeout() {
        GeoProviderError::Timeout
    } else {
        GeoProviderError::Http(e.to_string())
    }
}

#[async_trait]
impl GeoIpProvider for IpinfoProvider {
    async fn lookup(&self, ip: &str) -> Result<GeoLookup, GeoProviderError> {
        let url = self.lookup_url(ip);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?
            .error_for_status()
            .map_err(|e| GeoProviderError::Http(e.to_string()))?;

        let body: IpinfoResponse = response
            .json()
            .await
            .map_err(|e| GeoProviderError::Malformed(e.to_string()))?;

        let lookup = body.into_lookup();
        debug!(ip, country = %lookup.country_code, city = %lookup.city, "geolocation lookup");

        Ok(lookup)
    }
}
