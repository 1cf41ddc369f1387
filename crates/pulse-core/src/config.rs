//! Configuration for the Pulse core.
//!
//! A small YAML file configures the windowing thresholds; everything else
//! in the core is fixed behavior. Missing file or missing keys fall back
//! to defaults, so configuration is entirely optional.

use crate::summary::SummarizeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Top-level Pulse configuration.
///
/// ```yaml
/// summarize:
///   max_events_before_summarize: 30
///   keep_recent_events: 15
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Summarization windowing thresholds.
    #[serde(default)]
    pub summarize: SummarizeConfig,
}

impl PulseConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Loads configuration from a YAML file if it exists, defaults
    /// otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PulseConfig::default();
        assert_eq!(config.summarize.max_events_before_summarize, 30);
        assert_eq!(config.summarize.keep_recent_events, 15);
    }

    #[test]
    fn test_load_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pulse.yml");
        fs::write(
            &path,
            "summarize:\n  max_events_before_summarize: 50\n  keep_recent_events: 20\n",
        )
        .unwrap();

        let config = PulseConfig::load(&path).unwrap();
        assert_eq!(config.summarize.max_events_before_summarize, 50);
        assert_eq!(config.summarize.keep_recent_events, 20);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pulse.yml");
        fs::write(&path, "summarize:\n  keep_recent_events: 5\n").unwrap();

        let config = PulseConfig::load(&path).unwrap();
        assert_eq!(config.summarize.max_events_before_summarize, 30);
        assert_eq!(config.summarize.keep_recent_events, 5);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = PulseConfig::load_or_default(tmp.path().join("absent.yml")).unwrap();
        assert_eq!(config.summarize.max_events_before_summarize, 30);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pulse.yml");
        fs::write(&path, "summarize: [not, a, map]\n").unwrap();

        assert!(matches!(
            PulseConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
