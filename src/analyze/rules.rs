//! Static rule tables for the feature extractor.
//!
//! Three lists drive the text scans, all matched against the lower-cased article text:
//! - `CLICKBAIT_PATTERNS`: regexes for sensational phrasing (each counts at most once)
//! - `EMOTIONAL_WORDS`:    charged vocabulary, matched as plain substrings
//! - `CREDIBLE_MARKERS`:   outlet names/abbreviations, matched as plain substrings
//!
//! The tables are data only. Thresholds and point values live in `scoring`, so the rule set
//! can grow without touching the formula.

use once_cell::sync::Lazy;
use regex::Regex;

pub const CLICKBAIT_PATTERNS: [&str; 12] = [
    r"breaking.*exclusive",
    r"you won'?t believe",
    r"shocking.*revealed",
    r"they don'?t want you to know",
    r"doctors hate",
    r"click.*here",
    r"limited time",
    r"secret.*government",
    r"hidden truth",
    r"must (see|watch)",
    r"viral.*video",
    r"miracle.*cure",
];

pub const EMOTIONAL_WORDS: [&str; 11] = [
    "amazing",
    "horrible",
    "terrible",
    "unbelievable",
    "shocking",
    "outrageous",
    "fantastic",
    "miracle",
    "deadly",
    "urgent",
    "alert",
];

// "ap " keeps its trailing space so words like "apple" or "map" don't count.
pub const CREDIBLE_MARKERS: [&str; 6] = [
    "reuters",
    "bbc",
    "ap ",
    "npr",
    "wall street journal",
    "new york times",
];

static BUILTIN: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::compile(&CLICKBAIT_PATTERNS, &EMOTIONAL_WORDS, &CREDIBLE_MARKERS)
        .expect("built-in clickbait patterns are valid regexes")
});

/// Compiled rule tables. `RuleSet::builtin()` is the shared default; custom sets can be
/// compiled for experiments and tests.
#[derive(Debug, Clone)]
pub struct RuleSet {
    clickbait: Vec<Regex>,
    emotional: Vec<String>,
    credible: Vec<String>,
}

impl RuleSet {
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN
    }

    /// Compile a rule set. Words and markers are lower-cased here because the text they are
    /// matched against is always lower-cased first.
    pub fn compile<P, W, C>(patterns: &[P], emotional: &[W], credible: &[C]) -> anyhow::Result<Self>
    where
        P: AsRef<str>,
        W: AsRef<str>,
        C: AsRef<str>,
    {
        let clickbait = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|e| anyhow::anyhow!("clickbait pattern `{}`: {}", p, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            clickbait,
            emotional: lowered(emotional),
            credible: lowered(credible),
        })
    }

    /// Number of distinct clickbait patterns matching anywhere in `text`.
    pub fn count_clickbait(&self, text: &str) -> usize {
        self.clickbait.iter().filter(|re| re.is_match(text)).count()
    }

    /// Number of distinct emotional words present in `text`.
    pub fn count_emotional(&self, text: &str) -> usize {
        self.emotional
            .iter()
            .filter(|w| text.contains(w.as_str()))
            .count()
    }

    pub fn mentions_credible(&self, text: &str) -> bool {
        self.credible.iter().any(|m| text.contains(m.as_str()))
    }

    pub fn pattern_count(&self) -> usize {
        self.clickbait.len()
    }
}

fn lowered<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
