//! Kennel configuration: where saves live and how fast time runs.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.
//!
//! ```
//! use inubiyori_core::config::KennelConfig;
//!
//! let config = KennelConfig::from_toml_str("seconds_per_day = 86400.0").unwrap();
//! assert_eq!(config.seconds_per_day, 86_400.0);
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use inubiyori_logic::constants::DEFAULT_SECONDS_PER_DAY;
use inubiyori_logic::StatClock;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KennelConfig {
    /// Root directory for `trainer_data.json`, `graveyard.json` and `dogs/`.
    pub save_dir: PathBuf,
    /// Real seconds per simulated day.
    pub seconds_per_day: f64,
    /// Minimum real seconds between ticks. Enforced by the caller's loop.
    pub tick_interval_secs: f64,
}

impl Default for KennelConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            seconds_per_day: DEFAULT_SECONDS_PER_DAY,
            tick_interval_secs: 1.0,
        }
    }
}

impl KennelConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// All problems with this configuration. Empty means valid.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.save_dir.as_os_str().is_empty() {
            errors.push("save_dir must not be empty".to_string());
        }
        if !self.seconds_per_day.is_finite() || self.seconds_per_day <= 0.0 {
            errors.push(format!(
                "seconds_per_day must be positive, got {}",
                self.seconds_per_day
            ));
        }
        if !self.tick_interval_secs.is_finite() || self.tick_interval_secs < 0.0 {
            errors.push(format!(
                "tick_interval_secs must be non-negative, got {}",
                self.tick_interval_secs
            ));
        }
        errors
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    pub fn clock(&self) -> Result<StatClock, ConfigError> {
        StatClock::new(self.seconds_per_day).map_err(|e| ConfigError::Invalid(vec![e.to_string()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = KennelConfig::default();
        assert!(config.validation_errors().is_empty());
        assert_eq!(config.save_dir, PathBuf::from("saves"));
        assert_eq!(config.clock().unwrap().seconds_per_day(), 60.0);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = KennelConfig::from_toml_str("").unwrap();
        assert_eq!(config, KennelConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = KennelConfig::from_toml_str(
            r#"
            save_dir = "/tmp/kennel"
            seconds_per_day = 3600.0
            tick_interval_secs = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.save_dir, PathBuf::from("/tmp/kennel"));
        assert_eq!(config.seconds_per_day, 3600.0);
        assert_eq!(config.tick_interval_secs, 0.5);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = KennelConfig {
            save_dir: PathBuf::new(),
            seconds_per_day: 0.0,
            tick_interval_secs: -1.0,
        };
        assert_eq!(config.validation_errors().len(), 3);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.clock().is_err());
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(matches!(
            KennelConfig::from_toml_str("seconds_per_day = \"fast\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = KennelConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
