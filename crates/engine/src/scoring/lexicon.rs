//! Canonical keyword lexicon for the WBC scorer.
//!
//! Every call site that asks "is this message risky" scores against this one
//! table. Bump `LEXICON_VERSION` whenever a term is added, removed or moved
//! between tiers so stored assessments stay traceable.

/// Version tag stamped on every assessment.
pub const LEXICON_VERSION: &str = "wbc-lexicon/1";

/// Ordered keyword tiers. Terms are lowercase and matched as substrings of
/// the normalized message, first to last.
#[derive(Debug)]
pub struct Lexicon {
    pub version: &'static str,
    /// Explicit self-harm or suicide phrases.
    pub critical: &'static [&'static str],
    /// Self-harm language short of explicit suicidal intent.
    pub high_risk: &'static [&'static str],
    /// General distress vocabulary.
    pub moderate: &'static [&'static str],
}

pub static CANONICAL: Lexicon = Lexicon {
    version: LEXICON_VERSION,
    critical: &[
        "kill myself",
        "killing myself",
        "end my life",
        "ending my life",
        "want to die",
        "wanna die",
        "better off dead",
        "take my own life",
        "suicide",
        "suicidal",
        "end it all",
        "no reason to live",
    ],
    high_risk: &[
        "self harm",
        "self-harm",
        "hurt myself",
        "harm myself",
        "cut myself",
        "cutting myself",
        "hopeless",
        "worthless",
        "no way out",
        "give up on life",
    ],
    moderate: &[
        "depressed",
        "depression",
        "anxious",
        "anxiety",
        "alone",
        "lonely",
        "sad",
        "overwhelmed",
        "stressed",
        "exhausted",
        "empty inside",
        "scared",
        "panic",
        "crying",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_are_lowercase_and_unique_across_tiers() {
        let mut seen = std::collections::HashSet::new();
        for term in CANONICAL
            .critical
            .iter()
            .chain(CANONICAL.high_risk)
            .chain(CANONICAL.moderate)
        {
            assert_eq!(*term, term.to_lowercase(), "term not lowercase: {term}");
            assert!(seen.insert(*term), "duplicate term: {term}");
        }
    }
}
