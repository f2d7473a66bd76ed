// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod samples;
pub mod session;
pub mod store;
pub mod verdict;

// Feature extraction, rule tables and the scoring formula
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{
    extract_features, predict, validate_article, CapsScan, Detector, FeatureVector, InputError,
    RuleSet,
};
pub use crate::config::{ScannerConfig, StoreSettings};
pub use crate::session::{Analysis, Session};
pub use crate::store::{FeedbackKind, Report, ReportId, ReportStore, Stats};
pub use crate::verdict::{Adjustment, Indicator, Label, ScoreResult};
