use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EventId, SessionId, UserId};

/// Signal-detection outcome relating a prediction to ground truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Predicted at risk, actually at risk.
    Hit,
    /// Predicted safe, actually at risk. The worst failure mode.
    Miss,
    /// Predicted at risk, actually safe.
    FalseAlarm,
    /// Predicted safe, actually safe.
    CorrectRejection,
}

impl Outcome {
    /// Fixed truth table over (predicted, actual).
    pub fn from_prediction(predicted_risk: bool, actual_risk: bool) -> Self {
        match (predicted_risk, actual_risk) {
            (true, true) => Self::Hit,
            (false, true) => Self::Miss,
            (true, false) => Self::FalseAlarm,
            (false, false) => Self::CorrectRejection,
        }
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::FalseAlarm => "false_alarm",
            Self::CorrectRejection => "correct_rejection",
        }
    }
}

/// A ledger entry: one risk prediction and, once known, its ground truth.
///
/// Starts `recorded` (no `actual_risk`, no `outcome`) and becomes
/// `adjudicated` when a reviewer attaches ground truth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub user_id: UserId,
    pub session_id: SessionId,
    /// Message as received; never normalized.
    pub user_message: String,
    pub predicted_risk: bool,
    pub wbc_score: u8,
    /// Operating threshold in force when the prediction was made.
    pub threshold: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_risk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjudicated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DetectionEvent {
    /// Flagged at risk but nobody has confirmed or rejected it yet.
    pub fn needs_review(&self) -> bool {
        self.predicted_risk && self.actual_risk.is_none()
    }
}

/// Detection-quality metrics over adjudicated events.
///
/// Rates are 0.0 whenever their denominator is empty, except `miss_rate`,
/// which is 1.0 when events are adjudicated but none was at risk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionMetrics {
    pub total_events: usize,
    pub adjudicated: usize,
    pub pending: usize,
    pub hits: usize,
    pub misses: usize,
    pub false_alarms: usize,
    pub correct_rejections: usize,
    /// Sensitivity: hits / (hits + misses).
    pub hit_rate: f64,
    /// misses / (hits + misses).
    pub miss_rate: f64,
    /// false_alarms / (false_alarms + correct_rejections).
    pub false_alarm_rate: f64,
    /// hits / (hits + false_alarms).
    pub precision: f64,
    /// (hits + correct_rejections) / adjudicated.
    pub accuracy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_truth_table() {
        assert_eq!(Outcome::from_prediction(true, true), Outcome::Hit);
        assert_eq!(Outcome::from_prediction(false, true), Outcome::Miss);
        assert_eq!(Outcome::from_prediction(true, false), Outcome::FalseAlarm);
        assert_eq!(
            Outcome::from_prediction(false, false),
            Outcome::CorrectRejection
        );
    }

    #[test]
    fn test_only_predicted_safe_at_risk_is_miss() {
        let cases = [(true, true), (false, true), (true, false), (false, false)];
        let misses: Vec<(bool, bool)> = cases
            .into_iter()
            .filter(|&(p, a)| Outcome::from_prediction(p, a).is_miss())
            .collect();
        assert_eq!(misses, vec![(false, true)]);
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&Outcome::CorrectRejection).unwrap();
        assert_eq!(json, "\"correct_rejection\"");
        assert_eq!(Outcome::FalseAlarm.as_str(), "false_alarm");
    }
}
