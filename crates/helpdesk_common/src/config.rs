//! Helpdesk Configuration
//!
//! Tuning knobs for the suggestion engine and the pattern analyzer, plus
//! database location and log level.
//!
//! Configuration lives in /etc/helpdesk/config.toml unless overridden by
//! `--config` or `$HELPDESK_CONFIG`. A missing file means defaults; a file
//! that does not parse is an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HelpdeskError, Result};

/// System configuration directory
pub const SYSTEM_CONFIG_DIR: &str = "/etc/helpdesk";
const CONFIG_FILE: &str = "config.toml";

/// Environment override for the config file location
pub const CONFIG_ENV: &str = "HELPDESK_CONFIG";

/// Default database location
pub const DEFAULT_DB_PATH: &str = "/var/lib/helpdesk/helpdesk.db";

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Suggestion engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSettings {
    /// Maximum suggestions returned after merging (valid: 1-50)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_category_limit")]
    pub category_limit: usize,

    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,

    #[serde(default = "default_pattern_limit")]
    pub pattern_limit: usize,

    #[serde(default = "default_historical_limit")]
    pub historical_limit: usize,

    /// Patterns below this confidence (0-100) are ignored
    #[serde(default = "default_pattern_min_confidence")]
    pub pattern_min_confidence: f64,
}

fn default_max_results() -> usize {
    10
}

fn default_category_limit() -> usize {
    5
}

fn default_keyword_limit() -> usize {
    5
}

fn default_pattern_limit() -> usize {
    3
}

fn default_historical_limit() -> usize {
    3
}

fn default_pattern_min_confidence() -> f64 {
    60.0
}

impl SuggestionSettings {
    /// Validate and clamp max_results to valid range (1-50)
    pub fn effective_max_results(&self) -> usize {
        self.max_results.clamp(1, 50)
    }

    /// Pattern floor clamped to [0, 100]
    pub fn effective_pattern_min_confidence(&self) -> f64 {
        self.pattern_min_confidence.clamp(0.0, 100.0)
    }
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            category_limit: default_category_limit(),
            keyword_limit: default_keyword_limit(),
            pattern_limit: default_pattern_limit(),
            historical_limit: default_historical_limit(),
            pattern_min_confidence: default_pattern_min_confidence(),
        }
    }
}

/// Pattern analyzer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Trailing window analyzed by default (days, valid: 1-365)
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Minimum group size before a pattern is considered
    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: usize,

    /// Minimum confidence (0-100) before a pattern is persisted
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// How often `watch` re-runs the analysis (seconds, valid: 60-86400)
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,
}

fn default_window_days() -> u32 {
    30
}

fn default_min_occurrences() -> usize {
    3
}

fn default_min_confidence() -> f64 {
    70.0
}

fn default_watch_interval() -> u64 {
    3600 // 1 hour
}

impl AnalysisSettings {
    /// Validate and clamp window_days to valid range (1-365)
    pub fn effective_window_days(&self) -> u32 {
        self.window_days.clamp(1, 365)
    }

    /// At least one ticket per group
    pub fn effective_min_occurrences(&self) -> usize {
        self.min_occurrences.max(1)
    }

    /// Validate and clamp watch_interval_secs to valid range (60-86400)
    pub fn effective_watch_interval(&self) -> u64 {
        self.watch_interval_secs.clamp(60, 86400)
    }

    /// Check if window_days was clamped
    pub fn window_days_was_clamped(&self) -> bool {
        self.window_days != self.effective_window_days()
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            min_occurrences: default_min_occurrences(),
            min_confidence: default_min_confidence(),
            watch_interval_secs: default_watch_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub suggestions: SuggestionSettings,

    #[serde(default)]
    pub analysis: AnalysisSettings,

    #[serde(default)]
    pub log: LogConfig,
}

impl HelpdeskConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HelpdeskError::Config(e.to_string()))
    }

    /// Load from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| HelpdeskError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load using the lookup chain: explicit path, $HELPDESK_CONFIG, system file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(&resolve_config_path(explicit))
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| HelpdeskError::Config(e.to_string()))
    }
}

/// Which config file would be read
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    config_path()
}

/// Get the system config file path
pub fn config_path() -> PathBuf {
    PathBuf::from(SYSTEM_CONFIG_DIR).join(CONFIG_FILE)
}
