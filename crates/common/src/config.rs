use serde::{Deserialize, Serialize};

/// Top-level system configuration, deserialized from system.toml.
///
/// Every section falls back to the canonical policy constants when omitted,
/// so an empty file yields the production defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub scoring: ScoringConfig,
    pub ledger: LedgerConfig,
    pub export: ExportConfig,
}

/// Weights and tier boundaries for the WBC scorer.
///
/// The boundaries are load-bearing: `clear_max` gates `requires_intervention`
/// and is the ledger's default operating threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Highest score still classified as clear.
    pub clear_max: u8,
    /// Highest score still classified as clouded. Above this is critical.
    pub clouded_max: u8,
    /// Contribution of the first critical cue. Later critical cues add nothing.
    pub critical_weight: u32,
    /// Contribution of the first high-risk cue.
    pub high_risk_weight: u32,
    /// Contribution of each moderate cue, capped at `clouded_max`.
    pub moderate_weight: u32,
    /// Minimum score once any critical cue has matched.
    pub crisis_score_floor: u8,
    /// Contextual patterns only see this many leading characters.
    pub max_input_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            clear_max: 20,
            clouded_max: 50,
            critical_weight: 50,
            high_risk_weight: 30,
            moderate_weight: 10,
            crisis_score_floor: 100,
            max_input_chars: 10_000,
        }
    }
}

/// Operating threshold and tuning policy for the signal-detection ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// WBC above which a message is predicted at risk.
    pub initial_threshold: u8,
    /// Miss rate above which the threshold must be lowered.
    pub max_miss_rate: f64,
    /// False-alarm rate above which raising the threshold is considered.
    pub max_false_alarm_rate: f64,
    /// Raising is only allowed while the miss rate is below this.
    pub raise_requires_miss_rate_below: f64,
    /// Points removed from the threshold on a `lower` recommendation.
    pub lower_step: u8,
    /// Points added to the threshold on a `raise` recommendation.
    pub raise_step: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_threshold: 20,
            max_miss_rate: 0.10,
            max_false_alarm_rate: 0.30,
            raise_requires_miss_rate_below: 0.05,
            lower_step: 10,
            raise_step: 5,
        }
    }
}

/// Limits on the exported ledger report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Number of most recent events included in a report.
    pub recent_event_window: usize,
    /// Characters of the user message kept in event summaries.
    pub message_preview_chars: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            recent_event_window: 100,
            message_preview_chars: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: SystemConfig = toml::from_str("").unwrap();
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.ledger, LedgerConfig::default());
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_remaining_defaults() {
        let config: SystemConfig = toml::from_str(
            r#"
            [ledger]
            initial_threshold = 35
            "#,
        )
        .unwrap();
        assert_eq!(config.ledger.initial_threshold, 35);
        assert_eq!(config.ledger.lower_step, 10);
        assert_eq!(config.scoring.clouded_max, 50);
    }
}
