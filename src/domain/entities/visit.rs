//! Visit entities for redirect analytics.

use chrono::{DateTime, Utc};

/// Input data for recording a visit.
///
/// `rule_id` is `None` when the base URL was used (no geo rule matched).
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub link_id: i64,
    pub ip: String,
    pub country: String,
    pub city: String,
    pub rule_id: Option<i64>,
}

/// An immutable record of one resolved redirection.
///
/// Append-only: never updated after creation.
#[derive(Debug, Clone)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub country: String,
    pub city: String,
    pub rule_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
