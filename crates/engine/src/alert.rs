use safeguard_common::types::DetectionEvent;

/// Receives every adjudication that turned out to be a miss: a message from
/// someone genuinely at risk that was not flagged.
///
/// The ledger calls this after releasing its lock, once per transition into
/// the miss outcome. Implementations wire it to logging, paging, or a queue.
pub trait MissAlertSink: Send + Sync {
    fn on_miss(&self, event: &DetectionEvent);
}

impl<F> MissAlertSink for F
where
    F: Fn(&DetectionEvent) + Send + Sync,
{
    fn on_miss(&self, event: &DetectionEvent) {
        self(event)
    }
}

/// Default sink: ERROR-level structured log plus a miss counter.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAlertSink;

impl MissAlertSink for TracingAlertSink {
    fn on_miss(&self, event: &DetectionEvent) {
        tracing::error!(
            event_id = %event.id,
            user_id = %event.user_id,
            session_id = %event.session_id,
            wbc_score = event.wbc_score,
            threshold = event.threshold,
            notes = event.notes.as_deref().unwrap_or(""),
            "MISSED RISK: at-risk message was not flagged"
        );
        metrics::counter!("safety.misses").increment(1);
    }
}
