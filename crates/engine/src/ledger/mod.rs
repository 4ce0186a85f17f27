//! Signal-detection ledger.
//!
//! Append/amend-only record of risk predictions and their ground truth.
//! Entries are never deleted. All mutation goes through one mutex, which
//! also makes id assignment monotonic and collision-free.

pub mod metrics;
mod report;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use safeguard_common::config::{ExportConfig, LedgerConfig};
use safeguard_common::ids::{EventId, SessionId, UserId};
use safeguard_common::types::{
    DetectionEvent, DetectionMetrics, LedgerReport, Outcome, RiskAssessment, ThresholdAnalysis,
    ThresholdRecommendation,
};
use safeguard_common::{Result, SafeguardError};

use crate::alert::{MissAlertSink, TracingAlertSink};

const MAX_WBC_SCORE: u8 = 100;

/// Ledger of predictions, outcomes and the operating threshold.
pub struct SignalDetectionLedger {
    policy: LedgerConfig,
    export: ExportConfig,
    alert_sink: Arc<dyn MissAlertSink>,
    /// Guards events and threshold. Uses std::sync::Mutex because it is
    /// never held across await points.
    inner: Mutex<LedgerInner>,
}

struct LedgerInner {
    /// Position `i` holds the event with id `i + 1`.
    events: Vec<DetectionEvent>,
    threshold: u8,
}

impl LedgerInner {
    fn get(&self, id: EventId) -> Option<&DetectionEvent> {
        let idx = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.events.get(idx)
    }

    fn get_mut(&mut self, id: EventId) -> Option<&mut DetectionEvent> {
        let idx = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.events.get_mut(idx)
    }
}

impl SignalDetectionLedger {
    /// Ledger that reports misses through [`TracingAlertSink`].
    pub fn new(policy: LedgerConfig, export: ExportConfig) -> Self {
        Self::with_alert_sink(policy, export, Arc::new(TracingAlertSink))
    }

    pub fn with_alert_sink(
        policy: LedgerConfig,
        export: ExportConfig,
        alert_sink: Arc<dyn MissAlertSink>,
    ) -> Self {
        let threshold = metrics::clamp_threshold(i64::from(policy.initial_threshold));
        Self {
            policy,
            export,
            alert_sink,
            inner: Mutex::new(LedgerInner {
                events: Vec::new(),
                threshold,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LedgerInner> {
        // Every mutation completes or leaves state untouched, so a poisoned
        // guard is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record a prediction for an already-scored message.
    ///
    /// `predicted_risk` is derived here as `wbc_score > current threshold`.
    pub fn record_prediction(
        &self,
        user_id: UserId,
        session_id: SessionId,
        wbc_score: u8,
        user_message: &str,
    ) -> Result<DetectionEvent> {
        if wbc_score > MAX_WBC_SCORE {
            return Err(SafeguardError::Validation(format!(
                "wbc_score must be between 0 and {}, got {}",
                MAX_WBC_SCORE, wbc_score
            )));
        }

        let event = {
            let mut inner = self.lock();
            let threshold = inner.threshold;
            let event = DetectionEvent {
                id: EventId(inner.events.len() as u64 + 1),
                timestamp: Utc::now(),
                user_id,
                session_id,
                user_message: user_message.to_string(),
                predicted_risk: wbc_score > threshold,
                wbc_score,
                threshold,
                actual_risk: None,
                outcome: None,
                adjudicated_at: None,
                notes: None,
            };
            inner.events.push(event.clone());
            event
        };

        tracing::debug!(
            event_id = %event.id,
            session_id = %event.session_id,
            wbc_score = event.wbc_score,
            threshold = event.threshold,
            predicted_risk = event.predicted_risk,
            "Prediction recorded"
        );

        Ok(event)
    }

    /// Record the prediction implied by a scorer assessment.
    pub fn record_assessment(
        &self,
        user_id: UserId,
        session_id: SessionId,
        assessment: &RiskAssessment,
        user_message: &str,
    ) -> Result<DetectionEvent> {
        self.record_prediction(user_id, session_id, assessment.score, user_message)
    }

    /// Attach ground truth to an event.
    ///
    /// Re-adjudicating with the same `actual_risk` leaves the outcome alone
    /// and does not alert again. A changed `actual_risk` recomputes it.
    /// Transitioning into a miss fires the alert sink.
    pub fn record_outcome(
        &self,
        event_id: EventId,
        actual_risk: bool,
        notes: Option<String>,
    ) -> Result<DetectionEvent> {
        let (event, newly_missed) = {
            let mut inner = self.lock();
            let event = inner.get_mut(event_id).ok_or_else(|| not_found(event_id))?;

            let previous = event.outcome;
            if event.actual_risk != Some(actual_risk) {
                if let Some(prev) = previous {
                    tracing::warn!(
                        event_id = %event_id,
                        previous_outcome = prev.as_str(),
                        actual_risk,
                        "Ground truth changed, recomputing outcome"
                    );
                }
                event.actual_risk = Some(actual_risk);
                event.outcome =
                    Some(Outcome::from_prediction(event.predicted_risk, actual_risk));
                event.adjudicated_at = Some(Utc::now());
            }
            if notes.is_some() {
                event.notes = notes;
            }

            let newly_missed =
                event.outcome.is_some_and(|o| o.is_miss()) && previous != event.outcome;
            (event.clone(), newly_missed)
        };

        tracing::info!(
            event_id = %event.id,
            outcome = event.outcome.map(|o| o.as_str()).unwrap_or("none"),
            "Outcome recorded"
        );

        if newly_missed {
            self.alert_sink.on_miss(&event);
        }

        Ok(event)
    }

    pub fn get_event(&self, event_id: EventId) -> Result<DetectionEvent> {
        self.lock()
            .get(event_id)
            .cloned()
            .ok_or_else(|| not_found(event_id))
    }

    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current_threshold(&self) -> u8 {
        self.lock().threshold
    }

    /// Replace the operating threshold, clamped to 1..=100. Returns the value
    /// actually applied. Existing events keep the threshold they were
    /// recorded under.
    pub fn update_threshold(&self, new_threshold: i64) -> u8 {
        let applied = metrics::clamp_threshold(new_threshold);
        let previous = {
            let mut inner = self.lock();
            std::mem::replace(&mut inner.threshold, applied)
        };

        if previous != applied {
            tracing::info!(
                previous,
                threshold = applied,
                requested = new_threshold,
                "Operating threshold updated"
            );
        }

        applied
    }

    /// Detection-quality metrics over adjudicated events.
    pub fn get_metrics(&self) -> DetectionMetrics {
        metrics::compute_metrics(&self.lock().events)
    }

    /// Review the operating threshold against current metrics.
    pub fn analyze_threshold_performance(&self) -> ThresholdAnalysis {
        let (m, threshold) = {
            let inner = self.lock();
            (metrics::compute_metrics(&inner.events), inner.threshold)
        };
        metrics::analyze_threshold(m, threshold, &self.policy)
    }

    /// Analyze and apply the suggested threshold in one step.
    pub fn tune_threshold(&self) -> ThresholdAnalysis {
        let analysis = {
            let mut inner = self.lock();
            let m = metrics::compute_metrics(&inner.events);
            let analysis = metrics::analyze_threshold(m, inner.threshold, &self.policy);
            inner.threshold = analysis.suggested_threshold;
            analysis
        };

        if analysis.recommendation != ThresholdRecommendation::Maintain {
            tracing::warn!(
                recommendation = analysis.recommendation.as_str(),
                previous = analysis.current_threshold,
                threshold = analysis.suggested_threshold,
                reasoning = %analysis.reasoning,
                "Operating threshold tuned"
            );
        }

        analysis
    }

    /// Flagged events still awaiting ground truth, highest WBC first.
    /// Equal scores keep recording order (lower id first).
    pub fn events_needing_review(&self) -> Vec<DetectionEvent> {
        let mut pending: Vec<DetectionEvent> = self
            .lock()
            .events
            .iter()
            .filter(|e| e.needs_review())
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.wbc_score.cmp(&a.wbc_score).then(a.id.cmp(&b.id)));
        pending
    }

    /// Snapshot for offline review: metrics, threshold analysis and a bounded
    /// window of recent events.
    pub fn export_report(&self) -> LedgerReport {
        let inner = self.lock();
        report::build_report(&inner.events, inner.threshold, &self.policy, &self.export)
    }
}

fn not_found(event_id: EventId) -> SafeguardError {
    SafeguardError::NotFound(format!("detection event {}", event_id))
}
