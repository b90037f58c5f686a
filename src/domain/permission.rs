//! User to device links.

use serde::{Deserialize, Serialize};

use super::id::{DeviceId, UserId};

/// Grants `user_id` visibility of `device_id`. No attributes beyond the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub user_id: UserId,
    pub device_id: DeviceId,
}

impl Permission {
    #[must_use]
    pub const fn new(user_id: UserId, device_id: DeviceId) -> Self {
        Self { user_id, device_id }
    }
}

/// How `check_device` / `check_devices` interpret membership.
///
/// The reference server denies access when the device IS in the user's
/// allowed set. Whether callers rely on that is unresolved, so the literal
/// behaviour stays the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckPolicy {
    /// Deny when the device is linked to the user (reference behaviour).
    #[default]
    DenyListed,
    /// Deny unless the device is linked to the user.
    AllowListed,
}
