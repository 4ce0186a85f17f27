use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DetectionEvent, DetectionMetrics, Outcome, ThresholdAnalysis};
use crate::ids::{EventId, SessionId, UserId};

/// Compact view of a ledger entry for offline review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
    pub session_id: SessionId,
    pub predicted_risk: bool,
    pub wbc_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_risk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Leading characters of the user message.
    pub message_preview: String,
}

impl EventSummary {
    pub fn from_event(event: &DetectionEvent, message_preview: String) -> Self {
        Self {
            id: event.id,
            timestamp: event.timestamp,
            user_id: event.user_id,
            session_id: event.session_id,
            predicted_risk: event.predicted_risk,
            wbc_score: event.wbc_score,
            actual_risk: event.actual_risk,
            outcome: event.outcome,
            notes: event.notes.clone(),
            message_preview,
        }
    }
}

/// Serializable snapshot of the ledger for offline review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub generated_at: DateTime<Utc>,
    pub threshold: u8,
    pub metrics: DetectionMetrics,
    pub threshold_analysis: ThresholdAnalysis,
    /// Flagged events still awaiting ground truth.
    pub pending_review: usize,
    /// Most recent events, oldest first, bounded by the export window.
    pub recent_events: Vec<EventSummary>,
}
