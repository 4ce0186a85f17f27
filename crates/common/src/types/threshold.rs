use serde::{Deserialize, Serialize};

use super::DetectionMetrics;

/// Direction the operating threshold should move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdRecommendation {
    /// More sensitive: flag more messages.
    Lower,
    /// Less sensitive: only when misses are already rare.
    Raise,
    Maintain,
}

impl ThresholdRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Raise => "raise",
            Self::Maintain => "maintain",
        }
    }
}

/// Result of reviewing the operating threshold against detection metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdAnalysis {
    pub recommendation: ThresholdRecommendation,
    pub current_threshold: u8,
    pub suggested_threshold: u8,
    /// Human-readable explanation naming the rates behind the decision.
    pub reasoning: String,
    pub metrics: DetectionMetrics,
}
