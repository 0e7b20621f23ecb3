//! Link and geo rule entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortenable destination with its ordered geo-targeting rules.
///
/// The short `code` is globally unique and immutable once issued. Links are
/// deactivated (`active = false`) rather than hard-deleted to stop redirection
/// while preserving visit history.
///
/// Entities are `Serialize`/`Deserialize` so the redirect path can store the
/// whole link, rules included, as a single cache value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub code: String,
    pub base_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Rules in stored order. Match order is semantically significant:
    /// the first rule containing the resolved country wins.
    pub rules: Vec<GeoRule>,
}

/// One entry in a link's geo-targeting table.
///
/// `countries` holds ISO-3166 alpha-2 codes. The redirect URL may be
/// schemeless; scheme normalization happens at match time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoRule {
    pub id: i64,
    pub link_id: i64,
    pub redirect_url: String,
    pub countries: Vec<String>,
}

impl GeoRule {
    /// Returns true if this rule targets the given country code.
    pub fn matches(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }
}
