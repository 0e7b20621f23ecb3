//! Background worker persisting visit events.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;

/// Drains the visit channel and persists each event.
///
/// Persistence is at-most-once and best-effort: an insert failure is logged
/// and the event is dropped. The worker never propagates errors back to the
/// redirect path, which has already responded by the time events arrive here.
///
/// Runs until the sending side of the channel is closed.
pub async fn run_visit_worker(
    mut rx: mpsc::Receiver<VisitEvent>,
    visits: Arc<dyn VisitRepository>,
) {
    while let Some(ev) = rx.recv().await {
        let link_id = ev.link_id;
        if let Err(e) = visits.insert(ev.into()).await {
            tracing::warn!(link_id, error = %e, "failed to record visit");
        }
    }

    tracing::info!("visit worker stopped");
}
