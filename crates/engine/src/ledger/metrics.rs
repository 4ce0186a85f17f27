use safeguard_common::config::LedgerConfig;
use safeguard_common::types::{
    DetectionEvent, DetectionMetrics, Outcome, ThresholdAnalysis, ThresholdRecommendation,
};

pub const MIN_THRESHOLD: u8 = 1;
pub const MAX_THRESHOLD: u8 = 100;

/// Tally outcomes and derive rates. Unadjudicated events count only towards
/// `total_events` and `pending`.
///
/// `miss_rate` is `1 - hit_rate` once anything is adjudicated, so a ledger
/// with no confirmed at-risk cases reports a miss rate of 1.0. With nothing
/// adjudicated every rate is 0.
pub fn compute_metrics(events: &[DetectionEvent]) -> DetectionMetrics {
    let mut m = DetectionMetrics {
        total_events: events.len(),
        ..DetectionMetrics::default()
    };

    for outcome in events.iter().filter_map(|e| e.outcome) {
        match outcome {
            Outcome::Hit => m.hits += 1,
            Outcome::Miss => m.misses += 1,
            Outcome::FalseAlarm => m.false_alarms += 1,
            Outcome::CorrectRejection => m.correct_rejections += 1,
        }
    }

    m.adjudicated = m.hits + m.misses + m.false_alarms + m.correct_rejections;
    m.pending = m.total_events - m.adjudicated;

    m.hit_rate = ratio(m.hits, m.hits + m.misses);
    m.miss_rate = miss_rate(&m);
    m.false_alarm_rate = ratio(m.false_alarms, m.false_alarms + m.correct_rejections);
    m.precision = ratio(m.hits, m.hits + m.false_alarms);
    m.accuracy = ratio(m.hits + m.correct_rejections, m.adjudicated);

    m
}

/// Safety-first threshold policy.
///
/// 1. Miss rate above `max_miss_rate` → lower. Overrides everything else.
/// 2. False-alarm rate above `max_false_alarm_rate` while the miss rate is
///    under `raise_requires_miss_rate_below` → raise.
/// 3. Otherwise maintain.
///
/// Both comparisons are strict: a miss rate of exactly 10% maintains.
pub fn analyze_threshold(
    metrics: DetectionMetrics,
    current_threshold: u8,
    policy: &LedgerConfig,
) -> ThresholdAnalysis {
    let miss_pct = pct(metrics.miss_rate);
    let fa_pct = pct(metrics.false_alarm_rate);

    let current = i64::from(current_threshold);

    let (recommendation, suggested_threshold, reasoning) = if metrics.miss_rate
        > policy.max_miss_rate
    {
        let suggested = clamp_threshold(current - i64::from(policy.lower_step));
        (
            ThresholdRecommendation::Lower,
            suggested,
            format!(
                "Miss rate {:.1}% exceeds the {:.1}% limit ({} misses of {} at-risk cases); \
                 lowering the threshold from {} to {} to catch more at-risk users \
                 (false-alarm rate {:.1}% is not considered while misses are this high)",
                miss_pct,
                pct(policy.max_miss_rate),
                metrics.misses,
                metrics.hits + metrics.misses,
                current_threshold,
                suggested,
                fa_pct,
            ),
        )
    } else if metrics.hits + metrics.misses > 0
        && metrics.false_alarm_rate > policy.max_false_alarm_rate
        && metrics.miss_rate < policy.raise_requires_miss_rate_below
    {
        let suggested = clamp_threshold(current + i64::from(policy.raise_step));
        (
            ThresholdRecommendation::Raise,
            suggested,
            format!(
                "False-alarm rate {:.1}% exceeds the {:.1}% limit while miss rate {:.1}% is \
                 below {:.1}%; raising the threshold from {} to {}",
                fa_pct,
                pct(policy.max_false_alarm_rate),
                miss_pct,
                pct(policy.raise_requires_miss_rate_below),
                current_threshold,
                suggested,
            ),
        )
    } else {
        (
            ThresholdRecommendation::Maintain,
            current_threshold,
            format!(
                "Miss rate {:.1}% and false-alarm rate {:.1}% are within policy \
                 ({} adjudicated events); keeping the threshold at {}",
                miss_pct, fa_pct, metrics.adjudicated, current_threshold,
            ),
        )
    };

    ThresholdAnalysis {
        recommendation,
        current_threshold,
        suggested_threshold,
        reasoning,
        metrics,
    }
}

/// Clamp any requested threshold into the operating range.
pub fn clamp_threshold(value: i64) -> u8 {
    value.clamp(i64::from(MIN_THRESHOLD), i64::from(MAX_THRESHOLD)) as u8
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// `misses / (hits + misses)` equals `1 - hit_rate` whenever at-risk cases
/// exist and stays exact at the policy boundaries.
fn miss_rate(m: &DetectionMetrics) -> f64 {
    if m.adjudicated == 0 {
        0.0
    } else if m.hits + m.misses == 0 {
        1.0
    } else {
        ratio(m.misses, m.hits + m.misses)
    }
}

fn pct(rate: f64) -> f64 {
    rate * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use safeguard_common::ids::{EventId, SessionId, UserId};

    fn event(id: u64, outcome: Option<Outcome>) -> DetectionEvent {
        let (predicted_risk, actual_risk) = match outcome {
            Some(Outcome::Hit) => (true, Some(true)),
            Some(Outcome::Miss) => (false, Some(true)),
            Some(Outcome::FalseAlarm) => (true, Some(false)),
            Some(Outcome::CorrectRejection) => (false, Some(false)),
            None => (true, None),
        };
        DetectionEvent {
            id: EventId(id),
            timestamp: Utc::now(),
            user_id: UserId::new(),
            session_id: SessionId::new(),
            user_message: String::new(),
            predicted_risk,
            wbc_score: if predicted_risk { 60 } else { 10 },
            threshold: 20,
            actual_risk,
            outcome,
            adjudicated_at: None,
            notes: None,
        }
    }

    fn events(counts: &[(Outcome, usize)]) -> Vec<DetectionEvent> {
        let mut out = Vec::new();
        for &(outcome, count) in counts {
            for _ in 0..count {
                out.push(event(out.len() as u64 + 1, Some(outcome)));
            }
        }
        out
    }

    #[test]
    fn test_empty_ledger_metrics_are_zero() {
        let m = compute_metrics(&[]);
        assert_eq!(m, DetectionMetrics::default());
    }

    #[test]
    fn test_unadjudicated_events_are_excluded() {
        let m = compute_metrics(&[event(1, None), event(2, None)]);
        assert_eq!(m.total_events, 2);
        assert_eq!(m.pending, 2);
        assert_eq!(m.adjudicated, 0);
        assert_eq!(m.correct_rejections, 0);
        assert_eq!(m.hit_rate, 0.0);
        assert_eq!(m.false_alarm_rate, 0.0);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.accuracy, 0.0);
    }

    #[test]
    fn test_rates_from_mixed_outcomes() {
        let evs = events(&[
            (Outcome::Hit, 3),
            (Outcome::Miss, 1),
            (Outcome::FalseAlarm, 2),
            (Outcome::CorrectRejection, 4),
        ]);
        let m = compute_metrics(&evs);
        assert_eq!(m.adjudicated, 10);
        assert_eq!(m.hit_rate, 0.75);
        assert_eq!(m.miss_rate, 0.25);
        assert!((m.false_alarm_rate - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(m.precision, 0.6);
        assert_eq!(m.accuracy, 0.7);
    }

    #[test]
    fn test_empty_ledger_maintains() {
        let a = analyze_threshold(compute_metrics(&[]), 20, &LedgerConfig::default());
        assert_eq!(a.recommendation, ThresholdRecommendation::Maintain);
        assert_eq!(a.suggested_threshold, 20);
    }

    #[test]
    fn test_high_miss_rate_lowers_regardless_of_false_alarms() {
        let evs = events(&[
            (Outcome::Hit, 1),
            (Outcome::Miss, 1),
            (Outcome::FalseAlarm, 9),
            (Outcome::CorrectRejection, 1),
        ]);
        let a = analyze_threshold(compute_metrics(&evs), 20, &LedgerConfig::default());
        assert_eq!(a.recommendation, ThresholdRecommendation::Lower);
        assert_eq!(a.suggested_threshold, 10);
        assert!(a.reasoning.contains("Miss rate 50.0%"));
    }

    #[test]
    fn test_miss_rate_exactly_at_limit_maintains() {
        let evs = events(&[(Outcome::Hit, 9), (Outcome::Miss, 1)]);
        let m = compute_metrics(&evs);
        assert_eq!(m.miss_rate, 0.1);
        let a = analyze_threshold(m, 20, &LedgerConfig::default());
        assert_eq!(a.recommendation, ThresholdRecommendation::Maintain);
        assert_eq!(a.suggested_threshold, 20);
    }

    #[test]
    fn test_only_false_alarms_lowers() {
        let evs = events(&[(Outcome::FalseAlarm, 3)]);
        let m = compute_metrics(&evs);
        assert_eq!(m.hit_rate, 0.0);
        assert_eq!(m.miss_rate, 1.0);
        assert_eq!(m.false_alarm_rate, 1.0);

        let a = analyze_threshold(m, 20, &LedgerConfig::default());
        assert_eq!(a.recommendation, ThresholdRecommendation::Lower);
        assert_eq!(a.suggested_threshold, 10);
    }

    #[test]
    fn test_no_at_risk_cases_never_raises() {
        let evs = events(&[(Outcome::FalseAlarm, 4), (Outcome::CorrectRejection, 1)]);
        let mut m = compute_metrics(&evs);
        // Even with a permissive miss-rate figure, no at-risk evidence blocks a raise.
        m.miss_rate = 0.0;
        let a = analyze_threshold(m, 20, &LedgerConfig::default());
        assert_ne!(a.recommendation, ThresholdRecommendation::Raise);
        assert_eq!(a.suggested_threshold, 20);
    }

    #[test]
    fn test_noisy_but_safe_raises() {
        let evs = events(&[
            (Outcome::Hit, 20),
            (Outcome::FalseAlarm, 4),
            (Outcome::CorrectRejection, 6),
        ]);
        let a = analyze_threshold(compute_metrics(&evs), 20, &LedgerConfig::default());
        assert_eq!(a.recommendation, ThresholdRecommendation::Raise);
        assert_eq!(a.suggested_threshold, 25);
        assert!(a.reasoning.contains("False-alarm rate 40.0%"));
    }

    #[test]
    fn test_noisy_with_some_misses_maintains() {
        // 1 miss of 16 at-risk: 6.25%, under the lower limit but over the raise gate.
        let evs = events(&[
            (Outcome::Hit, 15),
            (Outcome::Miss, 1),
            (Outcome::FalseAlarm, 5),
            (Outcome::CorrectRejection, 5),
        ]);
        let a = analyze_threshold(compute_metrics(&evs), 20, &LedgerConfig::default());
        assert_eq!(a.recommendation, ThresholdRecommendation::Maintain);
    }

    #[test]
    fn test_steps_clamp_to_range() {
        let lower = events(&[(Outcome::Miss, 1)]);
        let a = analyze_threshold(compute_metrics(&lower), 5, &LedgerConfig::default());
        assert_eq!(a.suggested_threshold, MIN_THRESHOLD);

        let raise = events(&[(Outcome::Hit, 1), (Outcome::FalseAlarm, 1)]);
        let a = analyze_threshold(compute_metrics(&raise), 98, &LedgerConfig::default());
        assert_eq!(a.recommendation, ThresholdRecommendation::Raise);
        assert_eq!(a.suggested_threshold, MAX_THRESHOLD);
    }

    #[test]
    fn test_clamp_threshold() {
        assert_eq!(clamp_threshold(-40), 1);
        assert_eq!(clamp_threshold(0), 1);
        assert_eq!(clamp_threshold(42), 42);
        assert_eq!(clamp_threshold(250), 100);
    }
}
