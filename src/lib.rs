//! Trackwell - device tracking store core.
//!
//! Keeps the hot path of a GPS tracking server in memory: resolving a
//! reporting device by its hardware identifier, authorizing users against
//! devices, and appending positions while keeping each device's latest
//! position pointer current.
//!
//! # Architecture
//!
//! - [`domain`] - Devices, positions, permissions, users and their identifiers
//! - [`port`] - `Store`, `DeviceAdmin`, `UserAdmin` and `Clock` traits
//! - [`application`] - Device cache, permission index, write path, ingest
//! - [`adapter`] - SQLite and in-memory stores, the CLI
//! - [`infrastructure`] - Configuration and runtime wiring
//!
//! # Example
//!
//! ```no_run
//! use trackwell::domain::UserId;
//! use trackwell::infrastructure::bootstrap::Tracker;
//! use trackwell::infrastructure::config::settings::Config;
//!
//! fn main() -> trackwell::error::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let tracker = Tracker::open(&config)?;
//!     if let Some(device) = tracker.devices().resolve("123456789012345")? {
//!         tracker.permissions().check_device(UserId::new(1), device.id)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
