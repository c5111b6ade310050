//! Freshness threshold applied to resolved quotes.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// What to do with a quote older than the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleMode {
    /// Use it and flag it.
    #[default]
    Use,
    /// Treat it as absent and fall through to the next source.
    Skip,
}

impl fmt::Display for StaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Use => write!(f, "use"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Freshness threshold plus the action taken past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    /// `None` disables the check entirely.
    pub threshold: Option<Duration>,
    pub mode: StaleMode,
}

impl StalenessPolicy {
    /// Default threshold: three missed 20-minute refresh cycles.
    pub const DEFAULT_THRESHOLD: Duration = Duration::from_secs(3600);

    #[must_use]
    pub const fn new(threshold: Option<Duration>, mode: StaleMode) -> Self {
        Self { threshold, mode }
    }

    /// Never mark anything stale.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(None, StaleMode::Use)
    }

    #[must_use]
    pub fn is_stale(&self, age: Duration) -> bool {
        self.threshold.is_some_and(|limit| age > limit)
    }

    /// Whether a quote of this age should be skipped.
    #[must_use]
    pub fn rejects(&self, age: Duration) -> bool {
        self.mode == StaleMode::Skip && self.is_stale(age)
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new(Some(Self::DEFAULT_THRESHOLD), StaleMode::Use)
    }
}
