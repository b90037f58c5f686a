//! Device identity cache.
//!
//! Maps a device's external unique id to its store record. The whole map
//! shares one refresh timestamp: a lookup that finds the cache absent,
//! older than the refresh delay, or missing the key rebuilds the entire map
//! from the store before answering.
//!
//! Reloads are atomic. The new map is built outside the snapshot lock and
//! installed only once the store call succeeded; on failure the previous
//! snapshot stays in effect and the error goes back to the caller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::domain::{Device, UniqueId};
use crate::error::Result;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::Store;

/// Refresh delay used when none is configured.
pub const DEFAULT_REFRESH_DELAY_SECS: i64 = 300;

#[derive(Debug)]
struct Snapshot {
    devices: HashMap<UniqueId, Device>,
    loaded_at: DateTime<Utc>,
    generation: u64,
}

/// TTL-bounded cache from unique id to [`Device`].
pub struct DeviceCache {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    refresh_delay: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    /// Serializes reloads so concurrent stale lookups do not stampede the store.
    reload_lock: Mutex<()>,
    generations: AtomicU64,
}

impl DeviceCache {
    /// Create an empty cache. Nothing is loaded until the first lookup.
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, refresh_delay: Duration) -> Self {
        Self {
            store,
            clock,
            refresh_delay,
            snapshot: RwLock::new(None),
            reload_lock: Mutex::new(()),
            generations: AtomicU64::new(0),
        }
    }

    /// Resolve a unique id to a device snapshot.
    ///
    /// Returns `Ok(None)` if the id is not in the store as of the latest
    /// reload.
    ///
    /// # Errors
    /// Returns [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable)
    /// if a reload was needed and the store failed.
    pub fn resolve(&self, unique_id: &str) -> Result<Option<Device>> {
        let observed = {
            let snapshot = self.snapshot.read();
            match snapshot.as_ref() {
                Some(current) => {
                    if self.is_fresh(current) {
                        if let Some(device) = current.devices.get(unique_id) {
                            return Ok(Some(device.clone()));
                        }
                    }
                    Some(current.generation)
                }
                None => None,
            }
        };

        let _reload = self.reload_lock.lock();

        // Another caller may have installed a fresh snapshot while we waited.
        {
            let snapshot = self.snapshot.read();
            if let Some(current) = snapshot.as_ref() {
                if Some(current.generation) != observed && self.is_fresh(current) {
                    return Ok(current.devices.get(unique_id).cloned());
                }
            }
        }

        let fresh = self.load()?;
        let device = fresh.devices.get(unique_id).cloned();
        if device.is_none() {
            debug!(unique_id, "Unique id not found after device cache reload");
        }
        *self.snapshot.write() = Some(fresh);
        Ok(device)
    }

    /// Force a reload regardless of age. Returns the number of devices.
    ///
    /// # Errors
    /// Returns an error if the store fails; the previous snapshot is kept.
    pub fn reload(&self) -> Result<usize> {
        let _reload = self.reload_lock.lock();
        let fresh = self.load()?;
        let count = fresh.devices.len();
        *self.snapshot.write() = Some(fresh);
        Ok(count)
    }

    /// Drop the snapshot so the next lookup reloads.
    pub fn invalidate(&self) {
        *self.snapshot.write() = None;
    }

    /// Number of cached devices (0 before the first load).
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot
            .read()
            .as_ref()
            .map_or(0, |snapshot| snapshot.devices.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time of the last successful reload.
    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().as_ref().map(|s| s.loaded_at)
    }

    #[must_use]
    pub fn refresh_delay(&self) -> Duration {
        self.refresh_delay
    }

    fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        self.clock.now() - snapshot.loaded_at <= self.refresh_delay
    }

    fn load(&self) -> Result<Snapshot> {
        let devices = match self.store.fetch_all_devices() {
            Ok(devices) => devices,
            Err(e) => {
                warn!(error = %e, "Device cache reload failed, keeping previous snapshot");
                return Err(e);
            }
        };

        let devices: HashMap<UniqueId, Device> = devices
            .into_iter()
            .map(|device| (device.unique_id.clone(), device))
            .collect();
        debug!(devices = devices.len(), "Reloaded device cache");

        Ok(Snapshot {
            devices,
            loaded_at: self.clock.now(),
            generation: self.generations.fetch_add(1, Ordering::Relaxed) + 1,
        })
    }
}

impl std::fmt::Debug for DeviceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceCache")
            .field("refresh_delay", &self.refresh_delay)
            .field("len", &self.len())
            .field("last_refresh", &self.last_refresh())
            .finish_non_exhaustive()
    }
}
