//! session.rs: a detector plus the report store it feeds, scoped to one analysis session.
//!
//! The session owns the store for its whole lifetime; callers that need to share it across
//! threads clone the `Arc` from `store()`.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::analyze::{validate_article, Detector, InputError};
use crate::config::ScannerConfig;
use crate::store::{FeedbackKind, Report, ReportId, ReportStore, Stats};
use crate::verdict::ScoreResult;

/// Scored article together with the id it was stored under.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub id: ReportId,
    #[serde(flatten)]
    pub result: ScoreResult,
}

#[derive(Debug, Clone)]
pub struct Session {
    detector: Detector<'static>,
    store: Arc<ReportStore>,
    config: ScannerConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl Session {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            detector: Detector::new(config.scoring.caps_scan),
            store: Arc::new(ReportStore::with_settings(config.store)),
            config,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn detector(&self) -> &Detector<'static> {
        &self.detector
    }

    pub fn store(&self) -> Arc<ReportStore> {
        Arc::clone(&self.store)
    }

    /// Score and store an article. Blank input is accepted and scores REAL.
    pub fn analyze(&self, title: &str, content: &str) -> Analysis {
        let result = self.detector.predict(title, content);
        let id = self.store.add_report(
            title,
            content,
            result.label,
            result.confidence,
            result.features,
        );
        info!(
            %id,
            label = %result.label,
            confidence = result.confidence,
            adjustments = result.adjustments.len(),
            "article analyzed"
        );
        Analysis { id, result }
    }

    /// `analyze` behind the "both fields filled in" check; nothing is stored on error.
    pub fn analyze_checked(&self, title: &str, content: &str) -> Result<Analysis, InputError> {
        validate_article(title, content)?;
        Ok(self.analyze(title, content))
    }

    pub fn feedback(&self, id: &ReportId, kind: FeedbackKind) {
        self.store.add_user_feedback(id.as_str(), kind);
    }

    pub fn stats(&self) -> Stats {
        self.store.stats()
    }

    /// Newest reports, up to `history_limit` (20 unless configured).
    pub fn history(&self) -> Vec<Report> {
        self.store.recent_reports(self.config.store.history_limit)
    }
}
