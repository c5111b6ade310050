//! Price resolution settings.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::pricing::{StaleMode, StalenessPolicy};

/// `[pricing]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Quotes older than this are stale.
    pub stale_after_secs: u64,
    pub stale_mode: StaleMode,
    /// Turn the freshness check off entirely.
    pub check_staleness: bool,
}

impl PricingConfig {
    #[must_use]
    pub fn staleness_policy(&self) -> StalenessPolicy {
        if !self.check_staleness {
            return StalenessPolicy::disabled();
        }
        StalenessPolicy::new(
            Some(Duration::from_secs(self.stale_after_secs)),
            self.stale_mode,
        )
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.check_staleness && self.stale_after_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pricing.stale_after_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: StalenessPolicy::DEFAULT_THRESHOLD.as_secs(),
            stale_mode: StaleMode::default(),
            check_staleness: true,
        }
    }
}
