//! Tracked devices.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{DeviceId, PositionId, UniqueId};

/// A tracked device as persisted by the store.
///
/// Copies handed out by the identity cache are read-only snapshots of the
/// row at the time of the last reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub unique_id: UniqueId,
    pub name: String,
    /// Most recent position recorded for this device, if any.
    pub position_id: Option<PositionId>,
}

impl Device {
    /// Create a device snapshot with no latest position.
    pub fn new(id: DeviceId, unique_id: impl Into<UniqueId>, name: impl Into<String>) -> Self {
        Self {
            id,
            unique_id: unique_id.into(),
            name: name.into(),
            position_id: None,
        }
    }
}

/// A device that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDevice {
    unique_id: UniqueId,
    name: String,
}

impl NewDevice {
    /// Validate and create a new device registration.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyUniqueId`] if `unique_id` is blank.
    pub fn try_new(
        unique_id: impl Into<UniqueId>,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let unique_id = unique_id.into();
        if unique_id.as_str().trim().is_empty() {
            return Err(DomainError::EmptyUniqueId);
        }
        Ok(Self {
            unique_id,
            name: name.into(),
        })
    }

    #[must_use]
    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_device_rejects_blank_unique_id() {
        assert_eq!(
            NewDevice::try_new("  ", "truck"),
            Err(DomainError::EmptyUniqueId)
        );
    }

    #[test]
    fn new_device_keeps_fields() {
        let device = NewDevice::try_new("IMEI-A", "truck").unwrap();
        assert_eq!(device.unique_id().as_str(), "IMEI-A");
        assert_eq!(device.name(), "truck");
    }

    #[test]
    fn device_starts_without_latest_position() {
        let device = Device::new(DeviceId::new(1), "IMEI-A", "truck");
        assert!(device.position_id.is_none());
    }
}
