use crate::models::scale::ByteScale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Unit used for output when --scale is not given
    pub scale: ByteScale,
    /// Paths to report when none are given on the command line. Empty = all real mounts.
    pub mounts: Vec<String>,
}

/// Percent-used levels for `--check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub warn_pct: i64,
    pub crit_pct: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok       => "OK",
            Severity::Warning  => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl Thresholds {
    /// With warn at or above crit, `classify` can never report Warning.
    pub fn is_inverted(&self) -> bool {
        self.warn_pct >= self.crit_pct
    }

    pub fn classify(&self, percent_used: i64) -> Severity {
        if percent_used >= self.crit_pct {
            Severity::Critical
        } else if percent_used >= self.warn_pct {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { scale: ByteScale::Gigabyte, mounts: Vec::new() }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { warn_pct: 85, crit_pct: 95 }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the user config, falling back to defaults if it is missing or broken.
    pub fn load() -> Self {
        let Some(path) = Config::config_path() else {
            return Config::default();
        };
        match Config::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("ignoring config: {:#}", e);
                } else {
                    // Write defaults on first run (best-effort)
                    if let Err(e) = write_defaults(&path) {
                        tracing::debug!("could not write default config: {:#}", e);
                    }
                }
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        if cfg.thresholds.is_inverted() {
            tracing::warn!(
                warn_pct = cfg.thresholds.warn_pct,
                crit_pct = cfg.thresholds.crit_pct,
                "warn_pct is not below crit_pct in {}; --check will never report WARNING",
                path.display()
            );
        }
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("diskfree").join("diskfree.toml"))
    }
}

pub fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# diskfree configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("[thresholds]\ncrit_pct = 90\n").unwrap();
        assert_eq!(cfg.thresholds.crit_pct, 90);
        assert_eq!(cfg.thresholds.warn_pct, 85);
        assert_eq!(cfg.general, GeneralConfig::default());
    }

    #[test]
    fn scale_is_read_by_name() {
        let cfg: Config = toml::from_str("[general]\nscale = \"terabyte\"\nmounts = [\"/\", \"/home\"]\n").unwrap();
        assert_eq!(cfg.general.scale, ByteScale::Terabyte);
        assert_eq!(cfg.general.mounts, vec!["/", "/home"]);
    }

    #[test]
    fn defaults_written_then_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("diskfree.toml");
        write_defaults(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diskfree.toml");
        fs::write(&path, "[general]\nscale = \"furlong\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing"));

        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn inverted_thresholds_still_load() {
        assert!(!Thresholds::default().is_inverted());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diskfree.toml");
        fs::write(&path, "[thresholds]\nwarn_pct = 97\ncrit_pct = 90\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert!(cfg.thresholds.is_inverted());
        assert_eq!(cfg.thresholds.classify(93), Severity::Critical);
    }

    #[test]
    fn classify_uses_inclusive_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.classify(0),   Severity::Ok);
        assert_eq!(t.classify(84),  Severity::Ok);
        assert_eq!(t.classify(85),  Severity::Warning);
        assert_eq!(t.classify(95),  Severity::Critical);
        assert_eq!(t.classify(101), Severity::Critical);
    }
}
