//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::footprint::inputs::FootprintDefaults;

/// Environment variable overriding [`Config::output_dir`].
pub const ENV_OUTPUT_DIR: &str = "PCBAI_OUTPUT_DIR";

/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "PCBAI_LOG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directory footprints are written to when `--out` is not given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Default mask and paste settings.
    #[serde(default)]
    pub footprint: FootprintDefaults,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            output_dir: default_output_dir(),
            footprint: FootprintDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fp = &self.footprint;
        for (name, value) in [
            ("two_pad_mask_expansion", fp.two_pad_mask_expansion),
            ("lead_mask_expansion", fp.lead_mask_expansion),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("footprint.{name} must be a non-negative number, got {value}"),
                });
            }
        }
        if !fp.paste_ratio.is_finite() || fp.paste_ratio <= 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "footprint.paste_ratio must be greater than zero, got {}",
                    fp.paste_ratio
                ),
            });
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "output_dir must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// `main` passes a wrapper around `std::env::var`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.logging.level = level;
        }
        self
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_dir, PathBuf::from("build"));
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "output_dir": "/tmp/footprints.pretty",
            "footprint": {
                "two_pad_mask_expansion": 0.05,
                "lead_mask_expansion": 0.04,
                "paste_ratio": 0.9
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_dir, PathBuf::from("/tmp/footprints.pretty"));
        assert!((config.footprint.lead_mask_expansion - 0.04).abs() < f64::EPSILON);
        assert!((config.footprint.paste_ratio - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn footprint_defaults() {
        let config = Config::default();
        assert!((config.footprint.two_pad_mask_expansion - 0.05).abs() < f64::EPSILON);
        assert!((config.footprint.lead_mask_expansion - 0.03).abs() < f64::EPSILON);
        assert!((config.footprint.paste_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_invalid_paste_ratio() {
        let json = r#"{ "footprint": { "paste_ratio": 0.0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_negative_mask_expansion() {
        let json = r#"{ "footprint": { "lead_mask_expansion": -0.01 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_invalid_log_level() {
        let json = r#"{ "logging": { "level": "loud" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let config = Config::default().with_env_overrides(|key| match key {
            ENV_OUTPUT_DIR => Some("/srv/lib".to_string()),
            ENV_LOG_LEVEL => Some("info".to_string()),
            _ => None,
        });
        assert_eq!(config.output_dir, PathBuf::from("/srv/lib"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = Config::default().with_env_overrides(|_| Some(String::new()));
        assert_eq!(config.output_dir, PathBuf::from("build"));
        assert_eq!(config.logging.level, "warn");
    }
}
