//! Contextual phrase families.
//!
//! Each family groups regexes for one idea ("nobody would miss me",
//! "I can't go on"). A family fires at most once per message and adds its
//! own weight, independently of the keyword tiers. Patterns run against the
//! lowercased, apostrophe-normalized message.

use regex::Regex;
use std::sync::LazyLock;

/// A family of contextual cue regexes sharing one weight.
pub struct PatternFamily {
    pub id: &'static str,
    pub weight: u32,
    pub regexes: &'static [&'static LazyLock<Option<Regex>>],
}

impl PatternFamily {
    /// Whether any regex in the family matches.
    pub fn matches(&self, text: &str) -> bool {
        self.regexes
            .iter()
            .filter_map(|re| (*re).as_ref())
            .any(|re| re.is_match(text))
    }
}

macro_rules! cue_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Nobody would notice ────────────────────────────────────────────────────
cue_pattern!(
    RE_NOT_MISSED,
    r"\b(?:no ?one|nobody)\s+(?:would|will)\s+(?:even\s+)?(?:miss|notice|care)\b"
);

// ── Cannot continue ────────────────────────────────────────────────────────
cue_pattern!(
    RE_CANNOT_GO_ON,
    r"\bcan(?:'?t|not)\s+(?:go\s+on|keep\s+going|do\s+this\s+anymore|take\s+(?:it|this)\s+anymore)\b"
);

// ── Burden ─────────────────────────────────────────────────────────────────
cue_pattern!(
    RE_BURDEN_SELF,
    r"\b(?:i'?m|i\s+am)\s+(?:just\s+)?(?:a|such\s+a)\s+burden\b"
);
cue_pattern!(
    RE_BURDEN_ON_OTHERS,
    r"\bburden\s+(?:on|to)\s+(?:everyone|everybody|my\s+family|others)\b"
);

// ── Finality ───────────────────────────────────────────────────────────────
cue_pattern!(RE_GOODBYES, r"\b(?:saying|say|said)\s+(?:my\s+)?goodbyes?\b");
cue_pattern!(
    RE_GIVING_AWAY,
    r"\bgiving\s+away\s+(?:all\s+)?my\s+(?:things|stuff|belongings)\b"
);
cue_pattern!(
    RE_NOT_AROUND,
    r"\bwon'?t\s+be\s+(?:around|here)\s+(?:much\s+longer|anymore|tomorrow)\b"
);

// ── No point ───────────────────────────────────────────────────────────────
cue_pattern!(
    RE_NO_POINT,
    r"\bno\s+point\s+(?:in\s+)?(?:living|trying|going\s+on|anymore)\b"
);
cue_pattern!(
    RE_WHATS_THE_POINT,
    r"\bwhat'?s\s+the\s+point\s+(?:of|in)\s+(?:living|anything|going\s+on)\b"
);

static NOT_MISSED: PatternFamily = PatternFamily {
    id: "nobody_would_miss_me",
    weight: 30,
    regexes: &[&RE_NOT_MISSED],
};

static CANNOT_GO_ON: PatternFamily = PatternFamily {
    id: "cannot_go_on",
    weight: 30,
    regexes: &[&RE_CANNOT_GO_ON],
};

static BURDEN: PatternFamily = PatternFamily {
    id: "burden_on_others",
    weight: 30,
    regexes: &[&RE_BURDEN_SELF, &RE_BURDEN_ON_OTHERS],
};

static FINALITY: PatternFamily = PatternFamily {
    id: "finality",
    weight: 25,
    regexes: &[&RE_GOODBYES, &RE_GIVING_AWAY, &RE_NOT_AROUND],
};

static NO_POINT: PatternFamily = PatternFamily {
    id: "no_point",
    weight: 20,
    regexes: &[&RE_NO_POINT, &RE_WHATS_THE_POINT],
};

/// All families in evaluation order.
pub fn all_families() -> [&'static PatternFamily; 5] {
    [&NOT_MISSED, &CANNOT_GO_ON, &BURDEN, &FINALITY, &NO_POINT]
}

/// Ids of families whose regexes failed to compile. Should always be empty;
/// a non-empty result means those cues silently never fire.
pub fn broken_families() -> Vec<&'static str> {
    all_families()
        .into_iter()
        .filter(|f| f.regexes.iter().any(|re| re.is_none()))
        .map(|f| f.id)
        .collect()
}
