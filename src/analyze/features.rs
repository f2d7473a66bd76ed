//! Feature extraction: independent scans over the normalized article text.

use serde::{Deserialize, Serialize};

use super::rules::RuleSet;

/// Which casing the ALL-CAPS scan looks at.
///
/// `Normalized` scans the lower-cased text like every other feature, so for ordinary text
/// `all_caps_count` stays 0. `Original` scans the text as the caller wrote it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsScan {
    #[default]
    Original,
    Normalized,
}

/// Fixed set of text signals. All counts are derived from the same lower-cased text,
/// except `all_caps_count` under `CapsScan::Original`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub char_count: usize,
    pub word_count: usize,
    pub suspicious_patterns: usize,
    pub emotional_words: usize,
    pub exclamation_count: usize,
    pub all_caps_count: usize,
    pub credible_mention: bool,
}

impl FeatureVector {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Extract features with explicit rules and caps mode.
/// Empty or whitespace-only input yields the zero vector.
pub fn extract_with(text: &str, rules: &RuleSet, caps: CapsScan) -> FeatureVector {
    if text.trim().is_empty() {
        return FeatureVector::default();
    }

    let lower = text.to_lowercase();
    let caps_source = match caps {
        CapsScan::Original => text,
        CapsScan::Normalized => lower.as_str(),
    };

    FeatureVector {
        char_count: lower.chars().count(),
        word_count: lower.split_whitespace().count(),
        suspicious_patterns: rules.count_clickbait(&lower),
        emotional_words: rules.count_emotional(&lower),
        exclamation_count: lower.matches('!').count(),
        all_caps_count: count_shouting(caps_source),
        credible_mention: rules.mentions_credible(&lower),
    }
}

/// Tokens longer than 3 chars with at least one cased letter and no lower-case letter.
/// Punctuation is kept in the token, so "FOOTAGE!!!" counts and "123!" does not.
fn count_shouting(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().count() > 3 && is_upper_token(w))
        .count()
}

fn is_upper_token(w: &str) -> bool {
    let mut cased = false;
    for c in w.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str, caps: CapsScan) -> FeatureVector {
        extract_with(text, RuleSet::builtin(), caps)
    }

    #[test]
    fn blank_input_is_zero() {
        for t in ["", "   ", "\n\t "] {
            assert!(extract(t, CapsScan::Original).is_empty());
            assert!(extract(t, CapsScan::Normalized).is_empty());
        }
    }

    #[test]
    fn counts_on_lowered_text() {
        let f = extract("Hello World! Really!", CapsScan::Original);
        assert_eq!(f.char_count, 20);
        assert_eq!(f.word_count, 3);
        assert_eq!(f.exclamation_count, 2);
        assert_eq!(f.all_caps_count, 0);
        assert!(!f.credible_mention);
    }

    #[test]
    fn shouting_requires_length_and_letters() {
        assert_eq!(count_shouting("NASA FBI WOW2 1234 HEY!"), 3);
        assert_eq!(count_shouting("Mixed CASE words"), 1);
        assert_eq!(count_shouting("ÉCOLE"), 1);
    }

    #[test]
    fn caps_scan_modes_differ() {
        let text = "SHOCKING NEWS TODAY: ALIENS LANDED";
        assert_eq!(extract(text, CapsScan::Original).all_caps_count, 5);
        // Lower-cased text has no shouting left to find.
        assert_eq!(extract(text, CapsScan::Normalized).all_caps_count, 0);
    }

    #[test]
    fn other_features_ignore_caps_mode() {
        let text = "BREAKING exclusive: Reuters says you WON'T believe this!!";
        let a = extract(text, CapsScan::Original);
        let b = extract(text, CapsScan::Normalized);
        assert_eq!(a.suspicious_patterns, b.suspicious_patterns);
        assert_eq!(a.suspicious_patterns, 2);
        assert!(a.credible_mention && b.credible_mention);
        assert_eq!(a.exclamation_count, 2);
    }
}
