//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every table is optional and
//! falls back to built-in defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

mod logging;
mod pricing;
mod snapshots;

pub use logging::LoggingConfig;
pub use pricing::PricingConfig;
pub use snapshots::SnapshotConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "chestworth.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub snapshots: SnapshotConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Load `path`, or use defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.pricing.validate()?;
        self.snapshots.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pricing::StaleMode;
    use std::time::Duration;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.pricing.stale_after_secs, 3600);
        assert_eq!(config.pricing.stale_mode, StaleMode::Use);
        assert_eq!(config.snapshots.refresh_interval(), Duration::from_secs(1200));
        assert!(!config.snapshots.is_configured());
    }

    #[test]
    fn parses_all_tables() {
        let config = Config::parse(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [pricing]
            stale_after_secs = 600
            stale_mode = "skip"

            [snapshots]
            bazaar_path = "data/bazaar.json"
            refresh_interval_secs = 60
            "#,
        )
        .unwrap();

        let policy = config.pricing.staleness_policy();
        assert_eq!(policy.threshold, Some(Duration::from_secs(600)));
        assert_eq!(policy.mode, StaleMode::Skip);
        assert!(config.snapshots.is_configured());
        assert_eq!(config.snapshots.auction_path, None);
    }

    #[test]
    fn disabled_staleness_ignores_threshold() {
        let config = Config::parse(
            "[pricing]\ncheck_staleness = false\nstale_after_secs = 0\n",
        )
        .unwrap();
        assert_eq!(config.pricing.staleness_policy().threshold, None);
    }

    #[test]
    fn rejects_zero_interval() {
        let result = Config::parse("[snapshots]\nrefresh_interval_secs = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "snapshots.refresh_interval_secs",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_stale_mode() {
        let result = Config::parse("[pricing]\nstale_mode = \"sometimes\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn missing_default_file_is_not_an_error() {
        let config = Config::load_or_default("/nonexistent/chestworth.toml").unwrap();
        assert_eq!(config.logging.format, "pretty");
    }
}
