//! Store connection settings.

use serde::Deserialize;

use crate::adapter::outbound::sqlite::WriteStatements;

/// SQLite store configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database URL or file path.
    ///
    /// Overridden by `TRACKWELL_DATABASE_URL` when set.
    pub url: String,

    /// Maximum pooled connections.
    pub pool_size: u32,

    /// `PRAGMA busy_timeout` applied before writes, in milliseconds.
    pub busy_timeout_ms: u32,

    /// Execute the position insert. When false, recording a position is a
    /// no-op that produces no id.
    pub record_positions: bool,

    /// Execute the latest-position pointer update.
    pub track_latest_position: bool,
}

impl DatabaseConfig {
    /// Write statements enabled by this configuration.
    #[must_use]
    pub fn write_statements(&self) -> WriteStatements {
        WriteStatements {
            insert_position: self.record_positions,
            update_latest_position: self.track_latest_position,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "trackwell.db".into(),
            pool_size: 5,
            busy_timeout_ms: 5000,
            record_positions: true,
            track_latest_position: true,
        }
    }
}
