use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid low_score_threshold: {0}. Must be within [0, 1]")]
    InvalidScoreThreshold(f64),

    #[error("Invalid history_capacity: 0. Must be at least 1")]
    EmptyHistoryCapacity,

    #[error("Invalid max_iterations: 0. Must be at least 1")]
    ZeroMaxIterations,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `cogent.yaml` in the working directory (optional)
    /// 3. Environment variables (`COGENT_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("cogent.yaml"))
            .merge(Env::prefixed("COGENT_").split("__"))
            .extract()
            .context("Failed to load configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate cross-field constraints that serde defaults cannot express.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        match config.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(ConfigError::InvalidLogLevel(other.to_string())),
        }

        match config.logging.format.as_str() {
            "json" | "pretty" => {}
            other => return Err(ConfigError::InvalidLogFormat(other.to_string())),
        }

        if config.database.path.trim().is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        let threshold = config.monitor.low_score_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidScoreThreshold(threshold));
        }

        if config.monitor.history_capacity == 0 {
            return Err(ConfigError::EmptyHistoryCapacity);
        }

        if config.stop.max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DatabaseConfig, LoggingConfig, MonitorConfig};

    #[test]
    fn test_default_config_validates() {
        assert!(ConfigLoader::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let config = Config {
            logging: LoggingConfig {
                level: "verbose".to_string(),
                ..LoggingConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = Config {
            monitor: MonitorConfig {
                low_score_threshold: 1.5,
                ..MonitorConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidScoreThreshold(_))
        ));
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let config = Config {
            database: DatabaseConfig {
                path: "  ".to_string(),
            },
            ..Config::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDatabasePath)
        ));
    }
}
