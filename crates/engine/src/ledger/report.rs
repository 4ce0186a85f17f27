use chrono::Utc;

use safeguard_common::config::{ExportConfig, LedgerConfig};
use safeguard_common::types::{DetectionEvent, EventSummary, LedgerReport};

use super::metrics::{analyze_threshold, compute_metrics};
use crate::text::preview;

/// Build a report over `events`. Only the last `recent_event_window` events
/// are summarized, so payload size stays bounded however long the ledger
/// grows; metrics still cover every event.
pub(super) fn build_report(
    events: &[DetectionEvent],
    threshold: u8,
    policy: &LedgerConfig,
    export: &ExportConfig,
) -> LedgerReport {
    let metrics = compute_metrics(events);
    let threshold_analysis = analyze_threshold(metrics.clone(), threshold, policy);

    let start = events.len().saturating_sub(export.recent_event_window);
    let recent_events = events[start..]
        .iter()
        .map(|e| {
            EventSummary::from_event(e, preview(&e.user_message, export.message_preview_chars))
        })
        .collect();

    LedgerReport {
        generated_at: Utc::now(),
        threshold,
        metrics,
        threshold_analysis,
        pending_review: events.iter().filter(|e| e.needs_review()).count(),
        recent_events,
    }
}
