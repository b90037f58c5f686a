//! Cache and authorization settings.

use chrono::Duration;
use serde::Deserialize;

use crate::application::cache::device::DEFAULT_REFRESH_DELAY_SECS;
use crate::domain::CheckPolicy;

/// Upper bound accepted for the device refresh delay (one year).
pub const MAX_REFRESH_DELAY_SECS: u64 = 365 * 24 * 60 * 60;

/// Device identity cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum age of the device cache before a lookup forces a reload.
    pub device_refresh_delay_secs: u64,
}

impl CacheConfig {
    #[must_use]
    pub fn device_refresh_delay(&self) -> Duration {
        // chrono panics on out-of-range durations.
        let secs = self.device_refresh_delay_secs.min(MAX_REFRESH_DELAY_SECS);
        Duration::seconds(secs as i64)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            device_refresh_delay_secs: DEFAULT_REFRESH_DELAY_SECS as u64,
        }
    }
}

/// Permission index configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// How device checks interpret membership in the allowed set.
    pub check_policy: CheckPolicy,
}
