//! store.rs: append-only in-memory report history with running counters.
//!
//! The store is constructed by its owner and passed around explicitly; nothing here is
//! global. Reports and counters sit behind one mutex so each write (append + counter bumps)
//! happens as a single step and `fake + real + suspicious == total_checks` always holds.
//! Everything is lost when the store is dropped.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::analyze::features::FeatureVector;
use crate::config::StoreSettings;
use crate::verdict::Label;

/// Marker appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Short hex identifier of a stored report (10 chars).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Kind of user feedback on an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Correct,
    Wrong,
}

/// One stored analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    /// Content, cut to the store's limit with a trailing `…` when longer.
    pub content: String,
    pub prediction: Label,
    pub confidence: u8,
    pub features: FeatureVector,
    #[serde(serialize_with = "serialize_ts")]
    pub timestamp: DateTime<Utc>,
}

impl Report {
    /// RFC 3339 with fixed microsecond precision; sorts lexicographically in time order.
    pub fn timestamp_iso(&self) -> String {
        iso(&self.timestamp)
    }

    /// Timestamp to the second, e.g. `2025-08-16T10:00:00`.
    pub fn timestamp_display(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    pub fn title_preview(&self, max_chars: usize) -> String {
        truncate_chars(&self.title, max_chars)
    }
}

/// Running counters. Only the two write operations change them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_checks: u64,
    pub fake_detected: u64,
    pub real_detected: u64,
    pub suspicious_detected: u64,
    pub user_reports: u64,
}

/// Share of each label in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distribution {
    pub fake: f64,
    pub real: f64,
    pub suspicious: f64,
}

impl Stats {
    /// `None` until something has been analyzed.
    pub fn distribution(&self) -> Option<Distribution> {
        if self.total_checks == 0 {
            return None;
        }
        let total = self.total_checks as f64;
        let pct = |n: u64| n as f64 * 100.0 / total;
        Some(Distribution {
            fake: pct(self.fake_detected),
            real: pct(self.real_detected),
            suspicious: pct(self.suspicious_detected),
        })
    }

    fn record(&mut self, label: Label) {
        self.total_checks += 1;
        match label {
            Label::Fake => self.fake_detected += 1,
            Label::Real => self.real_detected += 1,
            Label::Suspicious => self.suspicious_detected += 1,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    reports: Vec<Report>,
    stats: Stats,
    /// Bumped per report; mixed into the id digest.
    seq: u64,
}

#[derive(Debug)]
pub struct ReportStore {
    inner: Mutex<Inner>,
    settings: StoreSettings,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore {
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    pub fn with_settings(settings: StoreSettings) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            settings,
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Store an analysis stamped with the current time and return its id.
    pub fn add_report(
        &self,
        title: &str,
        content: &str,
        prediction: Label,
        confidence: u8,
        features: FeatureVector,
    ) -> ReportId {
        self.add_report_at(title, content, prediction, confidence, features, Utc::now())
    }

    /// Same as `add_report` with an explicit timestamp.
    pub fn add_report_at(
        &self,
        title: &str,
        content: &str,
        prediction: Label,
        confidence: u8,
        features: FeatureVector,
        timestamp: DateTime<Utc>,
    ) -> ReportId {
        let mut inner = self.lock();
        inner.seq += 1;

        let id = ReportId(short_digest(&format!("{title}{}#{}", iso(&timestamp), inner.seq)));
        let report = Report {
            id: id.clone(),
            title: title.to_string(),
            content: truncate_chars(content, self.settings.content_limit),
            prediction,
            confidence: confidence.min(100),
            features,
            timestamp,
        };

        inner.reports.push(report);
        inner.stats.record(prediction);

        // Never log raw article text, only a digest of the title.
        debug!(
            %id,
            title_hash = %short_digest(title),
            %prediction,
            confidence,
            total_checks = inner.stats.total_checks,
            "report added"
        );
        id
    }

    /// Count one piece of user feedback. The id is not looked up and no report changes.
    pub fn add_user_feedback(&self, report_id: &str, kind: FeedbackKind) {
        let mut inner = self.lock();
        inner.stats.user_reports += 1;
        debug!(
            report_id,
            ?kind,
            user_reports = inner.stats.user_reports,
            "feedback recorded"
        );
    }

    pub fn stats(&self) -> Stats {
        self.lock().stats
    }

    /// Up to `limit` reports, newest first. Equal timestamps keep insertion order.
    pub fn recent_reports(&self, limit: usize) -> Vec<Report> {
        let mut out = self.lock().reports.clone();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        out.truncate(limit);
        out
    }

    /// `recent_reports` with the configured default limit.
    pub fn recent_reports_default(&self) -> Vec<Report> {
        self.recent_reports(self.settings.recent_limit)
    }

    pub fn len(&self) -> usize {
        self.lock().reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Writes never leave the data half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keep at most `max_chars` characters, appending `…` when something was cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&s[..cut]);
            out.push(ELLIPSIS);
            out
        }
        None => s.to_string(),
    }
}

/// First 5 bytes of SHA-256 as lower-case hex.
fn short_digest(text: &str) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write as _;
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(10);
    for b in digest.iter().take(5) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_ts<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&iso(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(sec: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + sec, 0).unwrap()
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abcd", 3), "abc…");
        assert_eq!(truncate_chars("ééééé", 2), "éé…");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn content_cut_at_limit() {
        let store = ReportStore::new();
        let long = "x".repeat(481);
        let exact = "y".repeat(480);
        store.add_report_at("a", &long, Label::Real, 100, FeatureVector::default(), ts(0));
        store.add_report_at("b", &exact, Label::Real, 100, FeatureVector::default(), ts(1));

        let r = store.recent_reports(2);
        assert_eq!(r[0].content, exact);
        assert_eq!(r[1].content.chars().count(), 481);
        assert!(r[1].content.ends_with(ELLIPSIS));
    }

    #[test]
    fn same_instant_gives_distinct_ids() {
        let store = ReportStore::new();
        let a = store.add_report_at("t", "c", Label::Fake, 80, FeatureVector::default(), ts(5));
        let b = store.add_report_at("t", "c", Label::Fake, 80, FeatureVector::default(), ts(5));
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 10);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let store = ReportStore::new();
        store.add_report_at("first", "", Label::Real, 100, FeatureVector::default(), ts(1));
        store.add_report_at("second", "", Label::Real, 100, FeatureVector::default(), ts(1));
        store.add_report_at("newest", "", Label::Real, 100, FeatureVector::default(), ts(2));
        let titles: Vec<_> = store
            .recent_reports(10)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["newest", "first", "second"]);
    }

    #[test]
    fn distribution_in_percent() {
        assert!(Stats::default().distribution().is_none());
        let s = Stats {
            total_checks: 4,
            fake_detected: 1,
            real_detected: 2,
            suspicious_detected: 1,
            user_reports: 9,
        };
        let d = s.distribution().unwrap();
        assert!((d.fake - 25.0).abs() < 1e-9);
        assert!((d.real - 50.0).abs() < 1e-9);
        assert!((d.suspicious - 25.0).abs() < 1e-9);
    }

    #[test]
    fn timestamp_formats() {
        let store = ReportStore::new();
        store.add_report_at("t", "c", Label::Real, 90, FeatureVector::default(), ts(0));
        let r = &store.recent_reports(1)[0];
        assert_eq!(r.timestamp_iso(), "2023-11-14T22:13:20.000000Z");
        assert_eq!(r.timestamp_display(), "2023-11-14T22:13:20");

        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["timestamp"], serde_json::json!("2023-11-14T22:13:20.000000Z"));
        assert_eq!(v["prediction"], serde_json::json!("REAL"));
    }

    #[test]
    fn title_preview_truncates() {
        let store = ReportStore::new();
        let title = "t".repeat(100);
        store.add_report(&title, "c", Label::Real, 100, FeatureVector::default());
        let r = &store.recent_reports(1)[0];
        assert_eq!(r.title, title);
        assert_eq!(r.title_preview(90).chars().count(), 91);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn store_events_pass_the_crate_filter() {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("fakenews_scanner=debug"))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let store = ReportStore::new();
        let secret_title = "A very private headline";
        tracing::subscriber::with_default(subscriber, || {
            let id = store.add_report(secret_title, "c", Label::Fake, 80, FeatureVector::default());
            store.add_user_feedback(id.as_str(), FeedbackKind::Wrong);
        });

        let logged = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("report added"), "{logged}");
        assert!(logged.contains("feedback recorded"), "{logged}");
        assert!(logged.contains("fakenews_scanner::store"), "{logged}");
        assert!(!logged.contains(secret_title));
    }
}
