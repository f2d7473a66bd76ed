// src/analyze/mod.rs
//! Analysis entry: feature extraction over the article text, then the linear score.

pub mod features;
pub mod rules;
pub mod scoring;

use crate::verdict::ScoreResult;

// Re-export convenient types.
pub use crate::analyze::features::{CapsScan, FeatureVector};
pub use crate::analyze::rules::RuleSet;
pub use crate::analyze::scoring::{classify, clamp_score, raw_score};

/// Scorer configured with a rule set and an ALL-CAPS scan mode. Holds no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct Detector<'r> {
    rules: &'r RuleSet,
    caps: CapsScan,
}

impl Default for Detector<'static> {
    fn default() -> Self {
        Self::new(CapsScan::default())
    }
}

impl Detector<'static> {
    /// Detector over the built-in rule tables.
    pub fn new(caps: CapsScan) -> Self {
        Self {
            rules: RuleSet::builtin(),
            caps,
        }
    }
}

impl<'r> Detector<'r> {
    pub fn with_rules(rules: &'r RuleSet, caps: CapsScan) -> Self {
        Self { rules, caps }
    }

    pub fn caps_scan(&self) -> CapsScan {
        self.caps
    }

    pub fn extract_features(&self, text: &str) -> FeatureVector {
        features::extract_with(text, self.rules, self.caps)
    }

    /// Score `title + " " + content`. Total: blank input yields REAL with confidence 100.
    pub fn predict(&self, title: &str, content: &str) -> ScoreResult {
        let text = format!("{title} {content}");
        let features = self.extract_features(&text);
        let (raw, adjustments) = raw_score(&features);
        let score = clamp_score(raw);
        let (label, confidence) = classify(score);
        ScoreResult {
            label,
            confidence,
            score,
            features,
            adjustments,
        }
    }
}

/// Extract features with the default detector.
pub fn extract_features(text: &str) -> FeatureVector {
    Detector::default().extract_features(text)
}

/// Predict with the default detector.
pub fn predict(title: &str, content: &str) -> ScoreResult {
    Detector::default().predict(title, content)
}

/// Caller-side check that both fields carry text. The scorer itself accepts blank input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("title is blank")]
    BlankTitle,
    #[error("content is blank")]
    BlankContent,
}

pub fn validate_article(title: &str, content: &str) -> Result<(), InputError> {
    if title.trim().is_empty() {
        return Err(InputError::BlankTitle);
    }
    if content.trim().is_empty() {
        return Err(InputError::BlankContent);
    }
    Ok(())
}
