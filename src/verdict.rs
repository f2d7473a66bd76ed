//! verdict.rs: result shapes returned to callers (label, confidence, and the indicators a
//! presentation layer shows next to the verdict).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analyze::features::FeatureVector;

/// Final classification of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Fake,
    Suspicious,
    Real,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fake => "FAKE",
            Label::Suspicious => "SUSPICIOUS",
            Label::Real => "REAL",
        }
    }

    /// Headline shown on the result card.
    pub fn headline(&self) -> &'static str {
        match self {
            Label::Fake => "Likely FAKE NEWS",
            Label::Suspicious => "SUSPICIOUS Content",
            Label::Real => "Likely CREDIBLE",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown label `{0}` (expected FAKE, SUSPICIOUS or REAL)")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FAKE" => Ok(Label::Fake),
            "SUSPICIOUS" => Ok(Label::Suspicious),
            "REAL" => Ok(Label::Real),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// One score adjustment that fired during `predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Which signal fired, e.g. "suspicious_patterns > 2".
    pub rule: String,
    pub delta: i32,
}

/// Output of the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub label: Label,
    /// Confidence in the label, 0..=100.
    pub confidence: u8,
    /// Clamped fake-likelihood score the label was derived from.
    pub score: u8,
    pub features: FeatureVector,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<Adjustment>,
}

impl ScoreResult {
    /// The six display indicators, in result-card order.
    pub fn indicators(&self) -> Vec<Indicator> {
        let f = &self.features;
        vec![
            Indicator::count("Suspicious phrases", f.suspicious_patterns),
            Indicator::count("Emotional words", f.emotional_words),
            Indicator::count("Exclamation marks", f.exclamation_count),
            Indicator::count("Shouting (ALL CAPS)", f.all_caps_count),
            Indicator::flag("Credible sources", f.credible_mention),
            Indicator::count("Word count", f.word_count),
        ]
    }
}

/// Name/value pair for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: String,
    pub value: String,
}

impl Indicator {
    fn count(name: &str, n: usize) -> Self {
        Self {
            name: name.to_string(),
            value: n.to_string(),
        }
    }

    fn flag(name: &str, on: bool) -> Self {
        Self {
            name: name.to_string(),
            value: if on { "Yes" } else { "No" }.to_string(),
        }
    }
}
