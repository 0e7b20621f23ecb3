//! Visit event model for asynchronous visit tracking.

use crate::domain::entities::NewVisit;

/// An in-memory visit event passed from the redirect path to the background
/// worker via a bounded channel.
///
/// This decouples the HTTP response from the database write: the redirect is
/// issued whether or not the visit row is ever persisted. Queue submission is
/// `try_send` — when the queue is full the event is dropped with a warning.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub link_id: i64,
    pub ip: String,
    pub country: String,
    pub city: String,
    /// Matched rule, or `None` when the base URL was used.
    pub rule_id: Option<i64>,
}

impl From<VisitEvent> for NewVisit {
    fn from(ev: VisitEvent) -> Self {
        NewVisit {
            link_id: ev.link_id,
            ip: ev.ip,
            country: ev.country,
            city: ev.city,
            rule_id: ev.rule_id,
        }
    }
}
