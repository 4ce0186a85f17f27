use proptest::prelude::*;

use safeguard_common::types::{Classification, SignalCategory};
use safeguard_engine::scoring::lexicon::CANONICAL;
use safeguard_engine::RiskScorer;

/// Free text interleaved with lexicon terms so every tier gets exercised.
fn message() -> impl Strategy<Value = String> {
    let term = prop::sample::select(
        CANONICAL
            .critical
            .iter()
            .chain(CANONICAL.high_risk)
            .chain(CANONICAL.moderate)
            .copied()
            .collect::<Vec<_>>(),
    );
    let word = prop_oneof![
        3 => "[a-zA-Z' ]{0,12}",
        1 => term.prop_map(str::to_string),
        1 => any::<String>(),
    ];
    prop::collection::vec(word, 0..12).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn score_is_deterministic(text in message()) {
        let scorer = RiskScorer::default();
        prop_assert_eq!(scorer.score(&text), scorer.score(&text));
    }

    #[test]
    fn score_is_bounded(text in any::<String>()) {
        let a = RiskScorer::default().score(&text);
        prop_assert!(a.score <= 100);
    }

    #[test]
    fn classification_follows_boundaries(text in message()) {
        let a = RiskScorer::default().score(&text);
        let expected = match a.score {
            0..=20 => Classification::Clear,
            21..=50 => Classification::Clouded,
            _ => Classification::Critical,
        };
        prop_assert_eq!(a.classification, expected);
        prop_assert_eq!(a.requires_intervention, a.score > 20);
    }

    #[test]
    fn crisis_iff_critical_signal(text in message()) {
        let a = RiskScorer::default().score(&text);
        prop_assert_eq!(
            a.crisis_detected,
            a.has_signal(SignalCategory::CriticalKeyword)
        );
        if a.crisis_detected {
            prop_assert_eq!(a.classification, Classification::Critical);
        }
    }

    #[test]
    fn moderate_terms_alone_never_reach_critical(
        terms in prop::sample::subsequence(CANONICAL.moderate.to_vec(), 0..=CANONICAL.moderate.len())
    ) {
        let a = RiskScorer::default().score(&terms.join(" "));
        prop_assert!(a.score <= 50, "score {} for {:?}", a.score, terms);
        prop_assert!(a.signals.iter().all(|s| s.category == SignalCategory::ModerateKeyword));
    }
}
