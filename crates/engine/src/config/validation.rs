use safeguard_common::config::SystemConfig;

use super::loader::ConfigError;

/// No single cue may weigh more than the whole score range.
const MAX_WEIGHT: u32 = 100;

/// Validate the complete system configuration.
///
/// Collects every problem before failing so an operator sees them all at
/// once. The service refuses to start on validation failure.
pub fn validate(config: &SystemConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_scoring(config, &mut errors);
    validate_ledger(config, &mut errors);
    validate_export(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_scoring(config: &SystemConfig, errors: &mut Vec<String>) {
    let s = &config.scoring;

    if s.clear_max >= s.clouded_max {
        errors.push("scoring.clear_max must be < scoring.clouded_max".into());
    }
    if s.clouded_max >= 100 {
        errors.push("scoring.clouded_max must be < 100".into());
    }
    let weights = [
        ("critical_weight", s.critical_weight),
        ("high_risk_weight", s.high_risk_weight),
        ("moderate_weight", s.moderate_weight),
    ];
    for (name, weight) in weights {
        if !(1..=MAX_WEIGHT).contains(&weight) {
            errors.push(format!("scoring.{} must be between 1 and {}", name, MAX_WEIGHT));
        }
    }
    // A lone critical cue has to land in the critical tier.
    if s.crisis_score_floor <= s.clouded_max
        && s.critical_weight <= u32::from(s.clouded_max)
    {
        errors.push(
            "scoring.crisis_score_floor or scoring.critical_weight must exceed scoring.clouded_max"
                .into(),
        );
    }
    if s.crisis_score_floor > 100 {
        errors.push("scoring.crisis_score_floor must be <= 100".into());
    }
    if s.max_input_chars == 0 {
        errors.push("scoring.max_input_chars must be > 0".into());
    }
}

fn validate_ledger(config: &SystemConfig, errors: &mut Vec<String>) {
    let l = &config.ledger;

    if !(1..=100).contains(&l.initial_threshold) {
        errors.push("ledger.initial_threshold must be between 1 and 100".into());
    }
    let rates = [
        ("max_miss_rate", l.max_miss_rate),
        ("max_false_alarm_rate", l.max_false_alarm_rate),
        (
            "raise_requires_miss_rate_below",
            l.raise_requires_miss_rate_below,
        ),
    ];
    for (name, rate) in rates {
        if !(0.0..=1.0).contains(&rate) {
            errors.push(format!("ledger.{} must be between 0.0 and 1.0", name));
        }
    }
    if l.raise_requires_miss_rate_below > l.max_miss_rate {
        errors.push("ledger.raise_requires_miss_rate_below must be <= ledger.max_miss_rate".into());
    }
    if l.lower_step == 0 {
        errors.push("ledger.lower_step must be > 0".into());
    }
    if l.raise_step == 0 {
        errors.push("ledger.raise_step must be > 0".into());
    }
}

fn validate_export(config: &SystemConfig, errors: &mut Vec<String>) {
    let e = &config.export;

    if e.recent_event_window == 0 {
        errors.push("export.recent_event_window must be > 0".into());
    }
}
