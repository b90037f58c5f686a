//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::application::cache::device::DeviceCache;
use crate::application::cache::permission::PermissionIndex;
use crate::application::ingest::PositionIngest;
use crate::application::position::PositionWriter;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{Clock, DeviceAdmin, Store, SystemClock, UserAdmin};

/// Open the configured SQLite database and apply pending migrations.
pub fn init_pool(config: &Config) -> Result<DbPool> {
    let pool = create_pool(&config.database.url, config.database.pool_size)?;
    run_migrations(&pool)?;
    info!(url = %config.database.url, "Database ready");
    Ok(pool)
}

/// Build the SQLite store with the configured write statements.
pub fn init_store(config: &Config) -> Result<Arc<SqliteStore>> {
    let pool = init_pool(config)?;
    let store = SqliteStore::with_statements(pool, config.database.write_statements())
        .busy_timeout_ms(config.database.busy_timeout_ms);
    Ok(Arc::new(store))
}

/// Fully wired tracking services sharing one store.
#[derive(Clone)]
pub struct Tracker {
    store: Arc<dyn Store>,
    admin: Arc<dyn DeviceAdmin>,
    users: Arc<dyn UserAdmin>,
    devices: Arc<DeviceCache>,
    permissions: Arc<PermissionIndex>,
    writer: Arc<PositionWriter>,
    ingest: Arc<PositionIngest>,
}

impl Tracker {
    /// Open the configured database and wire every service on top of it.
    ///
    /// A failing initial permission load is logged and leaves the index
    /// empty; device resolution and ingest do not depend on it.
    pub fn open(config: &Config) -> Result<Self> {
        let store = init_store(config)?;
        Ok(Self::with_store(store, config, Arc::new(SystemClock)))
    }

    /// Like [`open`](Self::open), but fails when the permission index
    /// cannot be loaded.
    pub fn open_with_permissions(config: &Config) -> Result<Self> {
        let store = init_store(config)?;
        let tracker = Self::wire(store, config, Arc::new(SystemClock));
        tracker.permissions.try_refresh()?;
        Ok(tracker)
    }

    /// Wire services over an existing store.
    ///
    /// The permission index is loaded once here; a failing store leaves it
    /// empty and the failure is logged.
    pub fn with_store<S>(store: Arc<S>, config: &Config, clock: Arc<dyn Clock>) -> Self
    where
        S: Store + DeviceAdmin + UserAdmin + 'static,
    {
        let tracker = Self::wire(store, config, clock);
        tracker.permissions.refresh();
        tracker
    }

    fn wire<S>(store: Arc<S>, config: &Config, clock: Arc<dyn Clock>) -> Self
    where
        S: Store + DeviceAdmin + UserAdmin + 'static,
    {
        let admin: Arc<dyn DeviceAdmin> = store.clone();
        let users: Arc<dyn UserAdmin> = store.clone();
        let store: Arc<dyn Store> = store;

        let devices = Arc::new(DeviceCache::new(
            Arc::clone(&store),
            clock,
            config.cache.device_refresh_delay(),
        ));
        let permissions = Arc::new(PermissionIndex::new(
            Arc::clone(&store),
            config.permissions.check_policy,
        ));

        let writer = Arc::new(PositionWriter::new(Arc::clone(&store)));
        let ingest = Arc::new(PositionIngest::new(
            Arc::clone(&devices),
            Arc::clone(&writer),
        ));

        Self {
            store,
            admin,
            users,
            devices,
            permissions,
            writer,
            ingest,
        }
    }

    /// Read side of the store, bypassing the caches.
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Device administration port.
    pub fn admin(&self) -> &dyn DeviceAdmin {
        self.admin.as_ref()
    }

    /// User accounts and login.
    pub fn users(&self) -> &dyn UserAdmin {
        self.users.as_ref()
    }

    /// Device identity cache.
    pub fn devices(&self) -> &DeviceCache {
        &self.devices
    }

    /// Permission authorization index.
    pub fn permissions(&self) -> &PermissionIndex {
        &self.permissions
    }

    /// Position write path.
    pub fn writer(&self) -> &PositionWriter {
        &self.writer
    }

    /// Report ingestion pipeline.
    pub fn ingest(&self) -> &PositionIngest {
        &self.ingest
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("devices", &self.devices)
            .field("permissions", &self.permissions)
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}
