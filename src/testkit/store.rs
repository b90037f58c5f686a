//! Instrumented store wrapper.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::domain::{
    Device, DeviceId, NewDevice, NewUser, Permission, Position, PositionId, User, UserId,
};
use crate::error::{Result, StoreError};
use crate::port::outbound::store::{DeviceAdmin, Store, UserAdmin};

/// Wraps a [`Store`], counting calls and optionally failing or slowing
/// down the bulk fetches.
#[derive(Debug)]
pub struct CountingStore<S> {
    inner: S,
    device_fetches: AtomicUsize,
    permission_fetches: AtomicUsize,
    inserts: AtomicUsize,
    latest_updates: AtomicUsize,
    failing: AtomicBool,
    fetch_delay: Mutex<Option<Duration>>,
}

impl<S: Store> CountingStore<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            device_fetches: AtomicUsize::new(0),
            permission_fetches: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            latest_updates: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            fetch_delay: Mutex::new(None),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of `fetch_all_devices` calls, including failed ones.
    pub fn device_fetches(&self) -> usize {
        self.device_fetches.load(Ordering::SeqCst)
    }

    /// Number of `fetch_all_permissions` calls, including failed ones.
    pub fn permission_fetches(&self) -> usize {
        self.permission_fetches.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn latest_updates(&self) -> usize {
        self.latest_updates.load(Ordering::SeqCst)
    }

    /// While set, every call fails with [`StoreError::Connection`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Sleep this long inside each bulk fetch.
    pub fn set_fetch_delay(&self, delay: Option<Duration>) {
        *self.fetch_delay.lock() = delay;
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("store offline".into()).into());
        }
        Ok(())
    }

    fn pause(&self) {
        let delay = *self.fetch_delay.lock();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
    }
}

impl<S: Store> Store for CountingStore<S> {
    fn fetch_all_devices(&self) -> Result<Vec<Device>> {
        self.device_fetches.fetch_add(1, Ordering::SeqCst);
        self.pause();
        self.check()?;
        self.inner.fetch_all_devices()
    }

    fn fetch_device_by_unique_id(&self, unique_id: &str) -> Result<Option<Device>> {
        self.check()?;
        self.inner.fetch_device_by_unique_id(unique_id)
    }

    fn fetch_all_permissions(&self) -> Result<Vec<Permission>> {
        self.permission_fetches.fetch_add(1, Ordering::SeqCst);
        self.pause();
        self.check()?;
        self.inner.fetch_all_permissions()
    }

    fn insert_position(&self, position: &Position) -> Result<Option<PositionId>> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.insert_position(position)
    }

    fn update_device_latest_position(
        &self,
        device_id: DeviceId,
        position_id: PositionId,
    ) -> Result<bool> {
        self.latest_updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.update_device_latest_position(device_id, position_id)
    }
}

impl<S: Store + DeviceAdmin> DeviceAdmin for CountingStore<S> {
    fn add_device(&self, device: &NewDevice) -> Result<Device> {
        self.check()?;
        self.inner.add_device(device)
    }

    fn update_device(&self, device: &Device) -> Result<bool> {
        self.check()?;
        self.inner.update_device(device)
    }

    fn remove_device(&self, device_id: DeviceId) -> Result<bool> {
        self.check()?;
        self.inner.remove_device(device_id)
    }

    fn link_device(&self, user_id: UserId, device_id: DeviceId) -> Result<()> {
        self.check()?;
        self.inner.link_device(user_id, device_id)
    }

    fn devices_for_user(&self, user_id: UserId) -> Result<Vec<Device>> {
        self.check()?;
        self.inner.devices_for_user(user_id)
    }
}

impl<S: Store + UserAdmin> UserAdmin for CountingStore<S> {
    fn add_user(&self, user: &NewUser) -> Result<User> {
        self.check()?;
        self.inner.add_user(user)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.check()?;
        self.inner.authenticate(email, password)
    }
}

/// Store whose insert and generated-key lookup are two separate steps over a
/// shared "last generated key", with a pause in between.
///
/// Callers that do not serialize inserts can read each other's key.
#[derive(Debug)]
pub struct LastKeyStore {
    rows: Mutex<Vec<(PositionId, Position)>>,
    last_key: AtomicI64,
    gap: Duration,
}

impl LastKeyStore {
    #[must_use]
    pub fn new(gap: Duration) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            last_key: AtomicI64::new(0),
            gap,
        }
    }

    /// Inserted rows with the key each one was stored under.
    pub fn rows(&self) -> Vec<(PositionId, Position)> {
        self.rows.lock().clone()
    }
}

impl Store for LastKeyStore {
    fn fetch_all_devices(&self) -> Result<Vec<Device>> {
        Ok(Vec::new())
    }

    fn fetch_device_by_unique_id(&self, _unique_id: &str) -> Result<Option<Device>> {
        Ok(None)
    }

    fn fetch_all_permissions(&self) -> Result<Vec<Permission>> {
        Ok(Vec::new())
    }

    fn insert_position(&self, position: &Position) -> Result<Option<PositionId>> {
        {
            let mut rows = self.rows.lock();
            let key = rows.len() as i64 + 1;
            rows.push((PositionId::new(key), position.clone()));
            self.last_key.store(key, Ordering::SeqCst);
        }
        std::thread::sleep(self.gap);
        Ok(Some(PositionId::new(self.last_key.load(Ordering::SeqCst))))
    }

    fn update_device_latest_position(
        &self,
        _device_id: DeviceId,
        _position_id: PositionId,
    ) -> Result<bool> {
        Ok(true)
    }
}
