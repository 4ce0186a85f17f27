use serde::{Deserialize, Serialize};

/// Which family of cue produced a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// Explicit self-harm or suicide phrase.
    CriticalKeyword,
    /// Self-harm language short of explicit suicidal intent.
    HighRiskKeyword,
    /// General distress vocabulary.
    ModerateKeyword,
    /// Multi-word contextual phrase matched by a pattern family.
    ContextualPattern,
}

/// One cue that fired while scoring a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSignal {
    pub category: SignalCategory,
    /// Lexicon term, or pattern family id for contextual patterns.
    pub matched_term: String,
    /// Points this signal added to the score.
    pub weight: u32,
}

/// Well-being tier derived from the WBC score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Clear,
    Clouded,
    Critical,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Clouded => "clouded",
            Self::Critical => "critical",
        }
    }
}

/// The scorer's verdict for a single message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Well-Being Coefficient, 0..=100.
    pub score: u8,
    pub classification: Classification,
    /// Signals in detection order.
    #[serde(default)]
    pub signals: Vec<RiskSignal>,
    pub requires_intervention: bool,
    pub crisis_detected: bool,
    /// Version of the lexicon that produced this assessment.
    pub lexicon_version: String,
}

impl RiskAssessment {
    /// Whether any signal of the given category fired.
    pub fn has_signal(&self, category: SignalCategory) -> bool {
        self.signals.iter().any(|s| s.category == category)
    }
}
