// src/config.rs
//! Scanner configuration (TOML).
//!
//! Resolution order:
//! 0) an explicit path (the CLI's `--config`)
//! 1) `$FAKENEWS_CONFIG_PATH` (must exist)
//! 2) `config/scanner.toml`
//! 3) built-in defaults
//!
//! `$FAKENEWS_CAPS_SCAN` (`original` | `normalized`) overrides `[scoring] caps_scan`
//! whichever file was used.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::analyze::features::CapsScan;

pub const DEFAULT_CONFIG_PATH: &str = "config/scanner.toml";
pub const ENV_CONFIG_PATH: &str = "FAKENEWS_CONFIG_PATH";
pub const ENV_CAPS_SCAN: &str = "FAKENEWS_CAPS_SCAN";

const DEFAULT_CONTENT_LIMIT: usize = 480;
const DEFAULT_RECENT_LIMIT: usize = 12;
const DEFAULT_HISTORY_LIMIT: usize = 20;
const DEFAULT_TITLE_PREVIEW: usize = 90;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub store: StoreSettings,
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Stored content is cut to this many characters (plus `…`).
    pub content_limit: usize,
    /// Default size of the "recent reports" view.
    pub recent_limit: usize,
    /// Reports shown by the session's history listing.
    pub history_limit: usize,
    /// Title length shown in history listings.
    pub title_preview: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            content_limit: DEFAULT_CONTENT_LIMIT,
            recent_limit: DEFAULT_RECENT_LIMIT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            title_preview: DEFAULT_TITLE_PREVIEW,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub caps_scan: CapsScan,
}

impl ScannerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: ScannerConfig = toml::from_str(s)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Load from an explicit path. File only, no env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading scanner config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing scanner config {}", path.display()))
    }

    /// Load using env var + fallbacks, then apply env overrides.
    pub fn load_default() -> Result<Self> {
        Self::load(None)
    }

    /// Resolve the file (`explicit` first, then env path, then fallback), then apply env
    /// overrides on top.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut cfg = match explicit {
            Some(p) => Self::load_from(p)?,
            None => Self::resolve_file()?,
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn resolve_file() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from(&pb);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            Self::load_from(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(caps) = parse_caps_env(std::env::var(ENV_CAPS_SCAN).ok()) {
            self.scoring.caps_scan = caps;
        }
    }

    // Zero limits would make every report or listing empty; treat them as unset.
    fn sanitize(&mut self) {
        let d = StoreSettings::default();
        if self.store.content_limit == 0 {
            self.store.content_limit = d.content_limit;
        }
        if self.store.recent_limit == 0 {
            self.store.recent_limit = d.recent_limit;
        }
        if self.store.history_limit == 0 {
            self.store.history_limit = d.history_limit;
        }
        if self.store.title_preview == 0 {
            self.store.title_preview = d.title_preview;
        }
    }
}

fn parse_caps_env(raw: Option<String>) -> Option<CapsScan> {
    let raw = raw?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "original" => Some(CapsScan::Original),
        "normalized" | "legacy" => Some(CapsScan::Normalized),
        other => {
            warn!(value = other, "ignoring unknown {ENV_CAPS_SCAN}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn empty_toml_is_defaults() {
        let cfg = ScannerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ScannerConfig::default());
        assert_eq!(cfg.store.content_limit, 480);
        assert_eq!(cfg.store.recent_limit, 12);
        assert_eq!(cfg.store.history_limit, 20);
        assert_eq!(cfg.scoring.caps_scan, CapsScan::Original);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = ScannerConfig::from_toml_str(
            r#"
[store]
recent_limit = 20

[scoring]
caps_scan = "normalized"
"#,
        )
        .unwrap();
        assert_eq!(cfg.store.recent_limit, 20);
        assert_eq!(cfg.store.content_limit, 480);
        assert_eq!(cfg.scoring.caps_scan, CapsScan::Normalized);
    }

    #[test]
    fn zero_limits_fall_back() {
        let cfg = ScannerConfig::from_toml_str("[store]\ncontent_limit = 0\nrecent_limit = 0\nhistory_limit = 0").unwrap();
        assert_eq!(cfg.store, StoreSettings::default());
    }

    #[test]
    fn bad_caps_value_is_an_error() {
        assert!(ScannerConfig::from_toml_str("[scoring]\ncaps_scan = \"shouty\"").is_err());
    }

    #[test]
    fn caps_env_parsing() {
        assert_eq!(parse_caps_env(None), None);
        assert_eq!(parse_caps_env(Some(" Original ".into())), Some(CapsScan::Original));
        assert_eq!(parse_caps_env(Some("legacy".into())), Some(CapsScan::Normalized));
        assert_eq!(parse_caps_env(Some("loud".into())), None);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD so the repo's own config/ is not picked up
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_CAPS_SCAN);

        // Nothing on disk → defaults
        assert_eq!(ScannerConfig::load_default().unwrap(), ScannerConfig::default());

        // Fallback file in ./config/
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(
            tmp.path().join(DEFAULT_CONFIG_PATH),
            "[store]\nrecent_limit = 5\n",
        )
        .unwrap();
        assert_eq!(ScannerConfig::load_default().unwrap().store.recent_limit, 5);

        // Env path wins over the fallback
        let p = tmp.path().join("custom.toml");
        fs::write(&p, "[store]\nrecent_limit = 7\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        assert_eq!(ScannerConfig::load_default().unwrap().store.recent_limit, 7);

        // Missing env path is an error
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
        assert!(ScannerConfig::load_default().is_err());
        env::remove_var(ENV_CONFIG_PATH);

        // Caps override applies on top of the file
        env::set_var(ENV_CAPS_SCAN, "normalized");
        assert_eq!(
            ScannerConfig::load_default().unwrap().scoring.caps_scan,
            CapsScan::Normalized
        );
        env::remove_var(ENV_CAPS_SCAN);

        env::set_current_dir(&old).unwrap();
    }

    #[serial_test::serial]
    #[test]
    fn explicit_path_still_takes_caps_env() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("explicit.toml");
        fs::write(&p, "[store]\nrecent_limit = 3\n\n[scoring]\ncaps_scan = \"original\"\n").unwrap();
        env::remove_var(ENV_CONFIG_PATH);

        env::remove_var(ENV_CAPS_SCAN);
        let plain = ScannerConfig::load(Some(&p)).unwrap();
        assert_eq!(plain.scoring.caps_scan, CapsScan::Original);
        assert_eq!(plain.store.recent_limit, 3);

        env::set_var(ENV_CAPS_SCAN, "normalized");
        let cfg = ScannerConfig::load(Some(&p)).unwrap();
        assert_eq!(cfg.scoring.caps_scan, CapsScan::Normalized);
        assert_eq!(cfg.store.recent_limit, 3);

        // Same file through the env path resolves identically
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        assert_eq!(ScannerConfig::load_default().unwrap(), cfg);

        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_CAPS_SCAN);
    }
}
