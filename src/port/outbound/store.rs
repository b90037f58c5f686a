//! Persistence ports for devices, permissions, positions and users.

use crate::domain::{
    Device, DeviceId, NewDevice, NewUser, Permission, Position, PositionId, User, UserId,
};
use crate::error::Result;

/// Storage operations the caches and the write path depend on.
///
/// Implementations own their timeout and retry policy. Every failure is
/// reported as [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable).
pub trait Store: Send + Sync {
    /// Load every device. Used for wholesale cache rebuilds.
    fn fetch_all_devices(&self) -> Result<Vec<Device>>;

    /// Look up a single device by its external identifier.
    fn fetch_device_by_unique_id(&self, unique_id: &str) -> Result<Option<Device>>;

    /// Load every user/device link.
    fn fetch_all_permissions(&self) -> Result<Vec<Permission>>;

    /// Append a position row and return the generated id.
    ///
    /// Returns `Ok(None)` when the store has no position statement
    /// configured; this is a no-op, not a failure.
    fn insert_position(&self, position: &Position) -> Result<Option<PositionId>>;

    /// Point the device's latest position at `position_id`.
    ///
    /// Returns `Ok(false)` when no statement is configured or no device row
    /// matched.
    fn update_device_latest_position(
        &self,
        device_id: DeviceId,
        position_id: PositionId,
    ) -> Result<bool>;
}

/// Administrative device and link management.
///
/// Writes through this port do not touch the in-memory caches; callers
/// invalidate or refresh them explicitly.
pub trait DeviceAdmin: Send + Sync {
    /// Register a device and return it with its generated id.
    fn add_device(&self, device: &NewDevice) -> Result<Device>;

    /// Rename a device or change its unique id. Returns `false` if missing.
    fn update_device(&self, device: &Device) -> Result<bool>;

    /// Delete a device and its user links. Returns `false` if missing.
    fn remove_device(&self, device_id: DeviceId) -> Result<bool>;

    /// Grant `user_id` access to `device_id`. Linking twice is a no-op.
    fn link_device(&self, user_id: UserId, device_id: DeviceId) -> Result<()>;

    /// Devices linked to `user_id`, ordered by id.
    fn devices_for_user(&self, user_id: UserId) -> Result<Vec<Device>>;
}

/// User accounts and password login.
pub trait UserAdmin: Send + Sync {
    /// Store a user and return it with its generated id. Emails are unique.
    fn add_user(&self, user: &NewUser) -> Result<User>;

    /// The user registered under `email`, if `password` matches its hash.
    ///
    /// An unknown email and a wrong password both yield `Ok(None)`.
    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>>;
}
