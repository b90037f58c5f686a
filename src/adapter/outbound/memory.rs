//! In-memory store implementation.
//!
//! Backs tests and dry runs. Behaves like the SQLite store, including the
//! "no statement configured" no-ops for the position write path.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use crate::domain::{
    Device, DeviceId, NewDevice, NewUser, PasswordHash, Permission, Position, PositionId, User,
    UserId,
};
use crate::error::{Result, StoreError};
use crate::port::outbound::store::{DeviceAdmin, Store, UserAdmin};

#[derive(Debug)]
struct MemoryState {
    devices: BTreeMap<DeviceId, Device>,
    links: BTreeSet<(UserId, DeviceId)>,
    positions: Vec<(PositionId, Position)>,
    users: Vec<(User, PasswordHash)>,
    next_device_id: i64,
    next_position_id: i64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            devices: BTreeMap::new(),
            links: BTreeSet::new(),
            positions: Vec::new(),
            users: Vec::new(),
            next_device_id: 1,
            next_position_id: 1,
        }
    }
}

/// In-memory store for testing purposes.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    record_positions: bool,
    track_latest_position: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with both write statements enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_statements(true, true)
    }

    /// Create an empty store, choosing which write statements exist.
    #[must_use]
    pub fn with_statements(record_positions: bool, track_latest_position: bool) -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            record_positions,
            track_latest_position,
        }
    }

    /// Insert a device with a caller-chosen id, replacing any existing row.
    pub fn put_device(&self, device: Device) {
        let mut state = self.state.write();
        state.next_device_id = state.next_device_id.max(device.id.value() + 1);
        state.devices.insert(device.id, device);
    }

    /// Insert a user/device link without checking the device exists.
    pub fn put_permission(&self, permission: Permission) {
        self.state
            .write()
            .links
            .insert((permission.user_id, permission.device_id));
    }

    /// Drop every user/device link.
    pub fn clear_permissions(&self) {
        self.state.write().links.clear();
    }

    /// Snapshot of every stored position in insertion order.
    #[must_use]
    pub fn positions(&self) -> Vec<(PositionId, Position)> {
        self.state.read().positions.clone()
    }

    /// Current row for a device, including its latest position pointer.
    #[must_use]
    pub fn device(&self, device_id: DeviceId) -> Option<Device> {
        self.state.read().devices.get(&device_id).cloned()
    }
}

impl Store for MemoryStore {
    fn fetch_all_devices(&self) -> Result<Vec<Device>> {
        Ok(self.state.read().devices.values().cloned().collect())
    }

    fn fetch_device_by_unique_id(&self, unique_id: &str) -> Result<Option<Device>> {
        Ok(self
            .state
            .read()
            .devices
            .values()
            .find(|d| d.unique_id.as_str() == unique_id)
            .cloned())
    }

    fn fetch_all_permissions(&self) -> Result<Vec<Permission>> {
        Ok(self
            .state
            .read()
            .links
            .iter()
            .map(|(user_id, device_id)| Permission::new(*user_id, *device_id))
            .collect())
    }

    fn insert_position(&self, position: &Position) -> Result<Option<PositionId>> {
        if !self.record_positions {
            return Ok(None);
        }
        let mut state = self.state.write();
        let id = PositionId::new(state.next_position_id);
        state.next_position_id += 1;
        state.positions.push((id, position.clone()));
        Ok(Some(id))
    }

    fn update_device_latest_position(
        &self,
        device_id: DeviceId,
        position_id: PositionId,
    ) -> Result<bool> {
        if !self.track_latest_position {
            return Ok(false);
        }
        let mut state = self.state.write();
        match state.devices.get_mut(&device_id) {
            Some(device) => {
                device.position_id = Some(position_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl DeviceAdmin for MemoryStore {
    fn add_device(&self, device: &NewDevice) -> Result<Device> {
        let mut state = self.state.write();
        let id = DeviceId::new(state.next_device_id);
        state.next_device_id += 1;
        let device = Device::new(id, device.unique_id().clone(), device.name());
        state.devices.insert(id, device.clone());
        Ok(device)
    }

    fn update_device(&self, device: &Device) -> Result<bool> {
        let mut state = self.state.write();
        match state.devices.get_mut(&device.id) {
            Some(existing) => {
                existing.name = device.name.clone();
                existing.unique_id = device.unique_id.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_device(&self, device_id: DeviceId) -> Result<bool> {
        let mut state = self.state.write();
        state.links.retain(|(_, linked)| *linked != device_id);
        Ok(state.devices.remove(&device_id).is_some())
    }

    fn link_device(&self, user_id: UserId, device_id: DeviceId) -> Result<()> {
        self.state.write().links.insert((user_id, device_id));
        Ok(())
    }

    fn devices_for_user(&self, user_id: UserId) -> Result<Vec<Device>> {
        let state = self.state.read();
        Ok(state
            .links
            .iter()
            .filter(|(linked_user, _)| *linked_user == user_id)
            .filter_map(|(_, device_id)| state.devices.get(device_id).cloned())
            .collect())
    }
}

impl UserAdmin for MemoryStore {
    fn add_user(&self, user: &NewUser) -> Result<User> {
        let mut state = self.state.write();
        if state.users.iter().any(|(existing, _)| existing.email == user.email()) {
            return Err(StoreError::Database(format!(
                "UNIQUE constraint failed: users.email ({})",
                user.email()
            ))
            .into());
        }
        let id = UserId::new(state.users.len() as i64 + 1);
        let stored = user.clone().into_user(id);
        state.users.push((stored.clone(), user.password().clone()));
        Ok(stored)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let email = email.trim();
        Ok(self
            .state
            .read()
            .users
            .iter()
            .find(|(user, _)| user.email == email)
            .filter(|(_, hash)| hash.verify(password))
            .map(|(user, _)| user.clone()))
    }
}
