//! Configuration System using Figment
//!
//! Configuration is loaded from:
//! 1. `config/decoder.toml` (base configuration)
//! 2. Environment variables (prefixed with `ACCEL_DECODE_`, nested keys split on `__`)
//!
//! Every section has defaults, so a missing file yields a usable configuration.
//!
//! # Example
//! ```no_run
//! use accel_decode::config::DecoderConfig;
//!
//! let config = DecoderConfig::load()?;
//! println!("Default units: {}", config.decoder.units);
//! # Ok::<(), figment::Error>(())
//! ```

use crate::format::reconcile::DEFAULT_TOLERANCE_SECS;
use crate::format::{ExactLengthPolicy, Units};
use crate::logging::OutputFormat;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/decoder.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Application settings
    #[serde(default)]
    pub application: ApplicationConfig,
    /// Decode pipeline settings
    #[serde(default)]
    pub decoder: DecodeSettings,
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_name")]
    pub name: String,
    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format (pretty, compact, json)
    #[serde(default)]
    pub log_format: OutputFormat,
}

/// Decode pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodeSettings {
    /// Units for the x, y, z columns (`g`, `ms-2` or `raw`)
    #[serde(default)]
    pub units: Units,
    /// Sample-count tolerance window in seconds
    #[serde(default = "default_tolerance")]
    pub tolerance_secs: u32,
    /// Handling of a sample count that exactly matches the header duration
    #[serde(default)]
    pub exact_length: ExactLengthPolicy,
}

// Default value functions
fn default_name() -> String {
    "accel-decode".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tolerance() -> u32 {
    DEFAULT_TOLERANCE_SECS
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            log_format: OutputFormat::default(),
        }
    }
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            units: Units::default(),
            tolerance_secs: default_tolerance(),
            exact_length: ExactLengthPolicy::default(),
        }
    }
}

impl DecodeSettings {
    /// Same settings with different output units.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }
}

impl DecoderConfig {
    /// Load configuration from `config/decoder.toml` and environment variables
    ///
    /// Environment variables override the file with prefix `ACCEL_DECODE_`.
    /// Example: `ACCEL_DECODE_DECODER__UNITS=ms-2`
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific file path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(DecoderConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("ACCEL_DECODE_").split("__"))
            .extract()
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.application.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.application.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.decoder.tolerance_secs == 0 {
            return Err("Invalid tolerance_secs 0. Must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = DecoderConfig::load_from("missing.toml")?;
            assert_eq!(config, DecoderConfig::default());
            assert_eq!(config.application.log_format, OutputFormat::Compact);
            assert_eq!(config.decoder.units, Units::G);
            assert_eq!(config.decoder.tolerance_secs, 300);
            assert_eq!(config.decoder.exact_length, ExactLengthPolicy::Reject);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "decoder.toml",
                r#"
                [application]
                log_level = "debug"
                log_format = "json"

                [decoder]
                units = "ms-2"
                tolerance_secs = 60
                exact_length = "accept"
                "#,
            )?;
            let config = DecoderConfig::load_from("decoder.toml")?;
            assert_eq!(config.application.log_level, "debug");
            assert_eq!(config.application.name, "accel-decode");
            assert_eq!(config.application.log_format, OutputFormat::Json);
            assert_eq!(config.decoder.units, Units::MetersPerSecondSquared);
            assert_eq!(config.decoder.tolerance_secs, 60);
            assert_eq!(config.decoder.exact_length, ExactLengthPolicy::Accept);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("decoder.toml", "[decoder]\nunits = \"g\"\n")?;
            jail.set_env("ACCEL_DECODE_DECODER__UNITS", "raw");
            let config = DecoderConfig::load_from("decoder.toml")?;
            assert_eq!(config.decoder.units, Units::Raw);
            Ok(())
        });
    }

    #[test]
    fn test_config_validation() {
        let mut config = DecoderConfig::default();
        assert!(config.validate().is_ok());

        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.application.log_level = "warn".to_string();
        config.decoder.tolerance_secs = 0;
        assert!(config.validate().is_err());
    }
}
