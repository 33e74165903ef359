//! Report configuration
//!
//! Loaded from a `report.toml` file; every key is optional and falls back to
//! the defaults below.

use crate::error::{ReportError, Result};
use crate::utils::text::ABBREVIATION_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "report.toml";

/// Longest accepted sparkline window, in days
pub const MAX_HISTORY_DAYS: i64 = 100 * 365;

/// Settings shared by the dashboard and the per-test renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title shown next to the logo
    pub title: String,
    /// Trailing window of the sparklines, in days
    pub history_days: i64,
    /// Number of previous reports linked in the subtitle
    pub history_links: usize,
    /// Values longer than this are abbreviated
    pub abbreviation_length: usize,
    /// strftime format of every date in the page
    pub date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Inviwo Regressions".to_string(),
            history_days: 31,
            history_links: 10,
            abbreviation_length: ABBREVIATION_LENGTH,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReportError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: ReportConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderers cannot use
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_HISTORY_DAYS).contains(&self.history_days) {
            return Err(ReportError::invalid_config(format!(
                "history_days must be between 0 and {}, got {}",
                MAX_HISTORY_DAYS, self.history_days
            )));
        }
        Ok(())
    }

    /// Default configuration as a commented TOML document
    pub fn default_toml() -> String {
        let defaults = Self::default();
        format!(
            r#"# Regression report settings

# Title shown in the page header
title = "{}"

# Days of history shown in the trend sparklines
history_days = {}

# Number of previous reports linked from the header
history_links = {}

# Values longer than this many characters are abbreviated
abbreviation_length = {}

# Format of all dates in the report
date_format = "{}"
"#,
            defaults.title,
            defaults.history_days,
            defaults.history_links,
            defaults.abbreviation_length,
            defaults.date_format
        )
    }

    /// Write the default configuration, keeping an existing file unless
    /// `force` is set. Returns whether the file was written.
    pub fn write_default<P: AsRef<Path>>(path: P, force: bool) -> Result<bool> {
        let path = path.as_ref();
        if path.exists() && !force {
            return Ok(false);
        }
        std::fs::write(path, Self::default_toml())?;
        Ok(true)
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_history_days(mut self, days: i64) -> Self {
        self.history_days = days;
        self
    }

    pub fn with_history_links(mut self, links: usize) -> Self {
        self.history_links = links;
        self
    }

    pub fn with_abbreviation_length(mut self, length: usize) -> Self {
        self.abbreviation_length = length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.history_days, 31);
        assert_eq!(config.history_links, 10);
        assert_eq!(config.abbreviation_length, 85);
    }

    #[test]
    fn test_default_toml_round_trip() {
        let parsed: ReportConfig = toml::from_str(&ReportConfig::default_toml()).unwrap();
        assert_eq!(parsed, ReportConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.toml");
        std::fs::write(&path, "history_days = 7\ntitle = \"Nightly\"\n").unwrap();

        let config = ReportConfig::load_from_file(&path).unwrap();
        assert_eq!(config.history_days, 7);
        assert_eq!(config.title, "Nightly");
        assert_eq!(config.history_links, 10);
    }

    #[test]
    fn test_history_days_out_of_range() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.toml");

        for days in ["-1", "200000000000000"] {
            std::fs::write(&path, format!("history_days = {}\n", days)).unwrap();
            let err = ReportConfig::load_from_file(&path).unwrap_err();
            assert!(matches!(err, ReportError::InvalidConfig { .. }), "{}", days);
            assert!(err.to_string().contains(days));
        }

        std::fs::write(&path, format!("history_days = {}\n", MAX_HISTORY_DAYS)).unwrap();
        assert_eq!(
            ReportConfig::load_from_file(&path).unwrap().history_days,
            MAX_HISTORY_DAYS
        );
    }

    #[test]
    fn test_missing_file() {
        let err = ReportConfig::load_from_file("/nonexistent/report.toml").unwrap_err();
        assert!(matches!(err, ReportError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_write_default_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.toml");
        std::fs::write(&path, "history_days = 3\n").unwrap();

        assert!(!ReportConfig::write_default(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "history_days = 3\n");

        assert!(ReportConfig::write_default(&path, true).unwrap());
        assert_eq!(ReportConfig::load_from_file(&path).unwrap(), ReportConfig::default());
    }
}
