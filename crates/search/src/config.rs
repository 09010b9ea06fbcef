//! Pipeline tuning.

use std::time::Duration;

/// Default quiet period before a term is considered settled.
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long the input must stay silent before its last value surfaces.
    pub quiet_period: Duration,
}

impl DebounceConfig {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            quiet_period: Duration::from_millis(ms),
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::from_millis(DEFAULT_QUIET_PERIOD_MS)
    }
}
