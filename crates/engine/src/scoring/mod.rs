//! Rule-based Well-Being Coefficient scorer.
//!
//! Converts one message into a bounded score, a tier, and the list of cues
//! that produced it. Scoring is pure: no I/O, no shared mutable state, no
//! logging, and it never fails.

pub mod lexicon;
pub mod patterns;

use safeguard_common::config::ScoringConfig;
use safeguard_common::types::{Classification, RiskAssessment, RiskSignal, SignalCategory};

use crate::text::truncate_chars;
use lexicon::Lexicon;

const MAX_SCORE: u32 = 100;

/// Deterministic keyword/pattern scorer.
///
/// Immutable after construction; share it freely across threads.
#[derive(Clone, Debug)]
pub struct RiskScorer {
    config: ScoringConfig,
    lexicon: &'static Lexicon,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            lexicon: &lexicon::CANONICAL,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn lexicon_version(&self) -> &'static str {
        self.lexicon.version
    }

    /// Score a message.
    ///
    /// Keyword tiers scan the whole message. Contextual patterns only see the
    /// first `max_input_chars` characters.
    pub fn score(&self, text: &str) -> RiskAssessment {
        let normalized = normalize(text);
        let pattern_window = truncate_chars(&normalized, self.config.max_input_chars);
        let mut signals = Vec::new();
        let mut total: u32 = 0;

        // Critical: first match only, later ones never stack.
        let critical = self
            .lexicon
            .critical
            .iter()
            .find(|term| normalized.contains(*term));
        if let Some(term) = critical {
            total = total.saturating_add(self.config.critical_weight);
            signals.push(signal(
                SignalCategory::CriticalKeyword,
                term,
                self.config.critical_weight,
            ));
        }
        let crisis_detected = critical.is_some();

        if let Some(term) = self
            .lexicon
            .high_risk
            .iter()
            .find(|term| normalized.contains(*term))
        {
            total = total.saturating_add(self.config.high_risk_weight);
            signals.push(signal(
                SignalCategory::HighRiskKeyword,
                term,
                self.config.high_risk_weight,
            ));
        }

        // Moderate cues saturate at the clouded ceiling.
        let ceiling = u32::from(self.config.clouded_max);
        for term in self.lexicon.moderate {
            if total.saturating_add(self.config.moderate_weight) > ceiling {
                break;
            }
            if normalized.contains(term) {
                total = total.saturating_add(self.config.moderate_weight);
                signals.push(signal(
                    SignalCategory::ModerateKeyword,
                    term,
                    self.config.moderate_weight,
                ));
            }
        }

        for family in patterns::all_families() {
            if family.matches(pattern_window) {
                total = total.saturating_add(family.weight);
                signals.push(signal(
                    SignalCategory::ContextualPattern,
                    family.id,
                    family.weight,
                ));
            }
        }

        if crisis_detected {
            total = total.max(u32::from(self.config.crisis_score_floor));
        }
        let score = total.min(MAX_SCORE) as u8;
        let classification = self.classify(score);

        RiskAssessment {
            score,
            classification,
            signals,
            requires_intervention: classification != Classification::Clear,
            crisis_detected,
            lexicon_version: self.lexicon.version.to_string(),
        }
    }

    /// Map a score onto its tier using the configured boundaries.
    pub fn classify(&self, score: u8) -> Classification {
        if score <= self.config.clear_max {
            Classification::Clear
        } else if score <= self.config.clouded_max {
            Classification::Clouded
        } else {
            Classification::Critical
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

fn signal(category: SignalCategory, term: &str, weight: u32) -> RiskSignal {
    RiskSignal {
        category,
        matched_term: term.to_string(),
        weight,
    }
}
