//! Geolocation value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel country code returned when geolocation fails.
///
/// Deliberately not a valid ISO-3166 alpha-2 code so it can never match a
/// configured geo rule.
pub const UNKNOWN_COUNTRY: &str = "UNKNOWN";

/// Sentinel city returned when geolocation fails.
pub const UNKNOWN_CITY: &str = "Unknown";

/// A resolved visitor location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub country_code: String,
    pub city: String,
}

impl GeoLocation {
    /// The unknown-location sentinel used whenever resolution fails.
    pub fn unknown() -> Self {
        Self {
            country_code: UNKNOWN_COUNTRY.to_string(),
            city: UNKNOWN_CITY.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.country_code == UNKNOWN_COUNTRY
    }
}

/// One row of the durable geolocation cache (`ip_geo_cache`).
///
/// Upsert semantics: one entry per IP, refreshed on every successful external
/// lookup. Valid only while `now < expires_at`; stale rows are overwritten,
/// never purged.
#[derive(Debug, Clone)]
pub struct GeoCacheEntry {
    pub ip: String,
    pub country_code: String,
    pub city: String,
    pub expires_at: DateTime<Utc>,
}

impl GeoCacheEntry {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            country_code: self.country_code.clone(),
            city: self.city.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_unknown_sentinel() {
        let loc = GeoLocation::unknown();
        assert_eq!(loc.country_code, "UNKNOWN");
        assert_eq!(loc.city, "Unknown");
        assert!(loc.is_unknown());
    }

    #[test]
    fn test_resolved_location_is_not_unknown() {
        let loc = GeoLocation {
            country_code: "DE".to_string(),
            city: "Berlin".to_string(),
        };
        assert!(!loc.is_unknown());
    }

    #[test]
    fn test_entry_expiry() {
        let mut entry = GeoCacheEntry {
            ip: "1.2.3.4".to_string(),
            country_code: "DE".to_string(),
            city: "Berlin".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        };
        assert!(!entry.is_expired());

        entry.expires_at = Utc::now() - Duration::seconds(1);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_entry_location() {
        let entry = GeoCacheEntry {
            ip: "1.2.3.4".to_string(),
            country_code: "FR".to_string(),
            city: "Paris".to_string(),
            expires_at: Utc::now(),
        };
        let loc = entry.location();
        assert_eq!(loc.country_code, "FR");
        assert_eq!(loc.city, "Paris");
    }
}
