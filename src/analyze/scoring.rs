//! Linear scoring over a `FeatureVector`.
//!
//! Each adjustment fires on its own threshold and adds a fixed delta; the sum is clamped to
//! `[0, 100]` and mapped to a label:
//! - score > 68        → FAKE       (confidence = score)
//! - 42 < score <= 68  → SUSPICIOUS (confidence = score)
//! - score <= 42       → REAL       (confidence = 100 - score)

use super::features::FeatureVector;
use crate::verdict::{Adjustment, Label};

pub const FAKE_ABOVE: u8 = 68;
pub const SUSPICIOUS_ABOVE: u8 = 42;

struct Rule {
    name: &'static str,
    fires: fn(&FeatureVector) -> bool,
    delta: i32,
}

const RULES: [Rule; 6] = [
    Rule {
        name: "suspicious_patterns > 2",
        fires: |f| f.suspicious_patterns > 2,
        delta: 30,
    },
    Rule {
        name: "emotional_words > 4",
        fires: |f| f.emotional_words > 4,
        delta: 20,
    },
    Rule {
        name: "exclamation_count > 4",
        fires: |f| f.exclamation_count > 4,
        delta: 15,
    },
    Rule {
        name: "all_caps_count > 2",
        fires: |f| f.all_caps_count > 2,
        delta: 12,
    },
    Rule {
        name: "credible_mention",
        fires: |f| f.credible_mention,
        delta: -30,
    },
    Rule {
        name: "word_count > 220",
        fires: |f| f.word_count > 220,
        delta: -18,
    },
];

/// Unclamped score plus the adjustments that produced it.
pub fn raw_score(f: &FeatureVector) -> (i32, Vec<Adjustment>) {
    let mut score = 0;
    let mut fired = Vec::new();
    for rule in RULES.iter().filter(|r| (r.fires)(f)) {
        score += rule.delta;
        fired.push(Adjustment {
            rule: rule.name.to_string(),
            delta: rule.delta,
        });
    }
    (score, fired)
}

pub fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Map a clamped score to `(label, confidence)`.
pub fn classify(score: u8) -> (Label, u8) {
    let score = score.min(100);
    if score > FAKE_ABOVE {
        (Label::Fake, score)
    } else if score > SUSPICIOUS_ABOVE {
        (Label::Suspicious, score)
    } else {
        (Label::Real, 100 - score)
    }
}
