//! Runtime caches used by application services.
//!
//! Provides thread-safe, in-memory views over the store:
//!
//! - [`device::DeviceCache`]: unique id to device, TTL-bounded wholesale reload
//! - [`permission::PermissionIndex`]: user to authorized devices, explicit refresh

pub mod device;
pub mod permission;
