//! Configuration for casewright.
//!
//! One [`CasewrightConfig`] is built at process start (defaults, then an
//! optional file, then environment overrides) and handed to each component
//! by reference. Nothing reads configuration from global state.

use anyhow::{Context, Result};
use casewright_synth::FixtureDefaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_OUTPUT_DIR: &str = "CASEWRIGHT_OUTPUT_DIR";
pub const ENV_PATTERN_STORE: &str = "CASEWRIGHT_PATTERN_STORE";
pub const ENV_LEARNING_ENABLED: &str = "CASEWRIGHT_LEARNING_ENABLED";
pub const ENV_LOG_LEVEL: &str = "CASEWRIGHT_LOG_LEVEL";

/// Configuration format types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    #[default]
    Yaml,
}

impl ConfigFormat {
    /// `.json` is JSON; everything else is YAML.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("learning.min_batch_size must be at least 3, got {0}")]
    BatchTooSmall(usize),
    #[error("invalid boolean for {var}: {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

/// Main casewright configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasewrightConfig {
    /// Where generated feature and case files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// JSON pattern store; learning is in-memory only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_store: Option<PathBuf>,

    /// Directory holding `{TICKET}.json` issue files
    #[serde(default = "default_issues_dir")]
    pub issues_dir: PathBuf,

    #[serde(default)]
    pub learning: LearningConfig,

    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Fixture values for login scenarios
    #[serde(default)]
    pub defaults: FixtureDefaults,

    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_tests")
}

fn default_issues_dir() -> PathBuf {
    PathBuf::from("issues")
}

fn default_true() -> bool {
    true
}

impl Default for CasewrightConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pattern_store: None,
            issues_dir: default_issues_dir(),
            learning: LearningConfig::default(),
            alignment: AlignmentConfig::default(),
            defaults: FixtureDefaults::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Pattern learning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Smallest batch a pattern may be learned from
    #[serde(default = "default_min_batch_size")]
    pub min_batch_size: usize,
    /// Score a case needs to be considered for a pattern
    #[serde(default = "default_pattern_quality_threshold")]
    pub pattern_quality_threshold: f64,
    /// Score at which feedback counts as successful; lower scores are enhanced
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f64,
}

fn default_min_batch_size() -> usize {
    3
}

fn default_pattern_quality_threshold() -> f64 {
    0.8
}

fn default_success_threshold() -> f64 {
    0.7
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_batch_size: default_min_batch_size(),
            pattern_quality_threshold: default_pattern_quality_threshold(),
            success_threshold: default_success_threshold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Jaccard similarity needed before a generated step is merged with a pattern step
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

fn default_similarity_threshold() -> f64 {
    0.5
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

/// Logging as written in a config file; parsed by the CLI into a subscriber config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl CasewrightConfig {
    /// Applies `CASEWRIGHT_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(store) = lookup(ENV_PATTERN_STORE).filter(|v| !v.trim().is_empty()) {
            self.pattern_store = Some(PathBuf::from(store));
        }
        if let Some(raw) = lookup(ENV_LEARNING_ENABLED) {
            self.learning.enabled = parse_bool(ENV_LEARNING_ENABLED, &raw)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.logging.level = level.trim().to_string();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            (
                "learning.pattern_quality_threshold",
                self.learning.pattern_quality_threshold,
            ),
            ("learning.success_threshold", self.learning.success_threshold),
            (
                "alignment.similarity_threshold",
                self.alignment.similarity_threshold,
            ),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.learning.min_batch_size < 3 {
            return Err(ConfigError::BatchTooSmall(self.learning.min_batch_size));
        }
        Ok(())
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: raw.to_string(),
        }),
    }
}

/// Load configuration from a file, format chosen by extension.
pub fn load_config(path: &Path) -> Result<CasewrightConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read config {path:?}"))?;
    let config: CasewrightConfig = match ConfigFormat::for_path(path) {
        ConfigFormat::Json => serde_json::from_str(&contents)
            .with_context(|| format!("parse JSON config {path:?}"))?,
        ConfigFormat::Yaml => serde_yaml::from_str(&contents)
            .with_context(|| format!("parse YAML config {path:?}"))?,
    };
    config
        .validate()
        .with_context(|| format!("invalid config {path:?}"))?;
    Ok(config)
}

/// Save configuration to a file, format chosen by extension.
pub fn save_config(path: &Path, config: &CasewrightConfig) -> Result<()> {
    let contents = match ConfigFormat::for_path(path) {
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).context("serialize JSON config")?
        }
        ConfigFormat::Yaml => serde_yaml::to_string(config).context("serialize YAML config")?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent:?}"))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write config {path:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn config_default_values() {
        let config = CasewrightConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("generated_tests"));
        assert_eq!(config.issues_dir, PathBuf::from("issues"));
        assert!(config.pattern_store.is_none());
        assert!(config.learning.enabled);
        assert_eq!(config.learning.min_batch_size, 3);
        assert_eq!(config.learning.pattern_quality_threshold, 0.8);
        assert_eq!(config.learning.success_threshold, 0.7);
        assert_eq!(config.alignment.similarity_threshold, 0.5);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_documents_take_defaults() {
        let from_json: CasewrightConfig = serde_json::from_str("{}").unwrap();
        let from_yaml: CasewrightConfig = serde_yaml::from_str("learning:\n  enabled: false\n").unwrap();
        assert_eq!(from_json, CasewrightConfig::default());
        assert!(!from_yaml.learning.enabled);
        assert_eq!(from_yaml.learning.min_batch_size, 3);
    }

    #[test]
    fn load_save_yaml_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("casewright.yaml");

        let mut config = CasewrightConfig::default();
        config.pattern_store = Some(PathBuf::from("patterns.json"));
        config.learning.enabled = false;
        config.defaults.username = "alice@example.com".into();

        save_config(&config_path, &config).unwrap();
        let loaded = load_config(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_save_json_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("casewright.json");

        save_config(&config_path, &CasewrightConfig::default()).unwrap();
        let text = std::fs::read_to_string(&config_path).unwrap();
        assert!(text.trim_start().starts_with('{'));
        assert_eq!(load_config(&config_path).unwrap(), CasewrightConfig::default());
    }

    #[test]
    fn load_rejects_out_of_range_threshold() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.json");
        std::fs::write(&config_path, r#"{"learning": {"success_threshold": 1.5}}"#).unwrap();
        let err = load_config(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("learning.success_threshold"));
    }

    #[test]
    fn validate_rejects_small_batches() {
        let mut config = CasewrightConfig::default();
        config.learning.min_batch_size = 2;
        assert_eq!(config.validate(), Err(ConfigError::BatchTooSmall(2)));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = CasewrightConfig::default();
        config
            .apply_env(env(&[
                (ENV_OUTPUT_DIR, "out"),
                (ENV_PATTERN_STORE, "store.json"),
                (ENV_LEARNING_ENABLED, "No"),
                (ENV_LOG_LEVEL, " debug "),
            ]))
            .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.pattern_store, Some(PathBuf::from("store.json")));
        assert!(!config.learning.enabled);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn env_blank_values_are_ignored() {
        let mut config = CasewrightConfig::default();
        config.apply_env(env(&[(ENV_OUTPUT_DIR, "  ")])).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("generated_tests"));
    }

    #[test]
    fn env_rejects_bad_bool() {
        let mut config = CasewrightConfig::default();
        let err = config
            .apply_env(env(&[(ENV_LEARNING_ENABLED, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    }
}
