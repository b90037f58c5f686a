//! Permission authorization index.
//!
//! Materializes the user/device link table as `user -> {device}`. The index
//! is only ever replaced wholesale by [`PermissionIndex::refresh`]; readers
//! see either the previous or the new map, never a mix.
//!
//! Refresh is atomic: the new map is built first and swapped in on success.
//! A store failure is logged and the previous index stays installed, unlike
//! the device cache which propagates store failures.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error};

use crate::domain::{CheckPolicy, DeviceId, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::store::Store;

/// Index of devices each user may see.
pub struct PermissionIndex {
    store: Arc<dyn Store>,
    policy: CheckPolicy,
    permissions: RwLock<HashMap<UserId, HashSet<DeviceId>>>,
}

impl PermissionIndex {
    /// Create an empty index. Call [`refresh`](Self::refresh) to populate it.
    pub fn new(store: Arc<dyn Store>, policy: CheckPolicy) -> Self {
        Self {
            store,
            policy,
            permissions: RwLock::new(HashMap::new()),
        }
    }

    /// Rebuild the index from the store, logging failures.
    pub fn refresh(&self) {
        if let Err(e) = self.try_refresh() {
            error!(error = %e, "Can't get permissions, keeping previous index");
        }
    }

    /// Rebuild the index from the store. Returns the number of links loaded.
    ///
    /// # Errors
    /// Returns the store error; the previous index is left untouched.
    pub fn try_refresh(&self) -> Result<usize> {
        let links = self.store.fetch_all_permissions()?;
        let count = links.len();

        let mut rebuilt: HashMap<UserId, HashSet<DeviceId>> = HashMap::new();
        for link in links {
            rebuilt.entry(link.user_id).or_default().insert(link.device_id);
        }
        let users = rebuilt.len();

        *self.permissions.write() = rebuilt;
        debug!(users, links = count, "Refreshed permission index");
        Ok(count)
    }

    /// Devices `user_id` may see. Unknown users get an empty set, which is
    /// remembered until the next refresh.
    #[must_use]
    pub fn allowed_devices(&self, user_id: UserId) -> HashSet<DeviceId> {
        if let Some(devices) = self.permissions.read().get(&user_id) {
            return devices.clone();
        }
        self.permissions
            .write()
            .entry(user_id)
            .or_default()
            .clone()
    }

    /// Gate access to one device's data.
    ///
    /// # Errors
    /// Returns [`Error::AuthorizationDenied`] according to the configured
    /// [`CheckPolicy`]. With the default `DenyListed` policy a device that IS
    /// linked to the user is denied.
    pub fn check_device(&self, user_id: UserId, device_id: DeviceId) -> Result<()> {
        let linked = self.with_allowed(user_id, |allowed| allowed.contains(&device_id));
        self.decide(user_id, linked, || vec![device_id])
    }

    /// Gate access to several devices at once.
    ///
    /// # Errors
    /// Returns [`Error::AuthorizationDenied`] according to the configured
    /// [`CheckPolicy`]. Membership means every device is linked, so an empty
    /// list counts as linked.
    pub fn check_devices(&self, user_id: UserId, device_ids: &[DeviceId]) -> Result<()> {
        let linked = self.with_allowed(user_id, |allowed| {
            device_ids.iter().all(|id| allowed.contains(id))
        });
        self.decide(user_id, linked, || device_ids.to_vec())
    }

    #[must_use]
    pub fn policy(&self) -> CheckPolicy {
        self.policy
    }

    /// Number of users currently in the index, memoized unknown users included.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.permissions.read().len()
    }

    fn with_allowed<T>(&self, user_id: UserId, f: impl FnOnce(&HashSet<DeviceId>) -> T) -> T {
        {
            let permissions = self.permissions.read();
            if let Some(allowed) = permissions.get(&user_id) {
                return f(allowed);
            }
        }
        let mut permissions = self.permissions.write();
        f(permissions.entry(user_id).or_default())
    }

    fn decide(
        &self,
        user_id: UserId,
        linked: bool,
        device_ids: impl FnOnce() -> Vec<DeviceId>,
    ) -> Result<()> {
        let denied = match self.policy {
            CheckPolicy::DenyListed => linked,
            CheckPolicy::AllowListed => !linked,
        };
        if denied {
            return Err(Error::AuthorizationDenied {
                user_id,
                device_ids: device_ids(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for PermissionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionIndex")
            .field("policy", &self.policy)
            .field("users", &self.user_count())
            .finish_non_exhaustive()
    }
}
