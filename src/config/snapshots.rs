//! Snapshot file locations and refresh cadence.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Where market snapshots are read from and how often.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub bazaar_path: Option<PathBuf>,
    pub auction_path: Option<PathBuf>,
    pub refresh_interval_secs: u64,
}

impl SnapshotConfig {
    /// Twenty minutes, matching the upstream API's refresh cadence.
    pub const DEFAULT_REFRESH_SECS: u64 = 1200;

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.bazaar_path.is_some() || self.auction_path.is_some()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "snapshots.refresh_interval_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            bazaar_path: None,
            auction_path: None,
            refresh_interval_secs: Self::DEFAULT_REFRESH_SECS,
        }
    }
}
