//! SQLite store implementation.
//!
//! Provides persistent storage for devices, users, user links and positions
//! using SQLite and Diesel ORM.

use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::warn;

use crate::adapter::outbound::sqlite::database::connection::{configure_sqlite_connection, DbPool};
use crate::adapter::outbound::sqlite::database::model::{
    DeviceRow, NewDeviceRow, NewPositionRow, NewUserRow, UserDeviceRow, UserRow,
};
use crate::adapter::outbound::sqlite::database::schema::{devices, positions, user_devices, users};
use crate::domain::{
    Device, DeviceId, NewDevice, NewUser, Permission, Position, PositionId, User, UserId,
};
use crate::error::{Result, StoreError};
use crate::port::outbound::store::{DeviceAdmin, Store, UserAdmin};

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    #[diesel(column_name = "id")]
    id: i64,
}

/// Which write statements the store executes.
///
/// A disabled statement turns the matching operation into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStatements {
    pub insert_position: bool,
    pub update_latest_position: bool,
}

impl Default for WriteStatements {
    fn default() -> Self {
        Self {
            insert_position: true,
            update_latest_position: true,
        }
    }
}

/// SQLite-backed store.
///
/// Implements [`Store`] for the caches and write path, and [`DeviceAdmin`]
/// and [`UserAdmin`] for administrative commands.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
    statements: WriteStatements,
    busy_timeout_ms: u32,
}

impl SqliteStore {
    /// Create a store over `pool` with every statement enabled.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self::with_statements(pool, WriteStatements::default())
    }

    #[must_use]
    pub fn with_statements(pool: DbPool, statements: WriteStatements) -> Self {
        Self {
            pool,
            statements,
            busy_timeout_ms: 5000,
        }
    }

    /// Override the SQLite busy timeout applied before writes.
    #[must_use]
    pub fn busy_timeout_ms(mut self, busy_timeout_ms: u32) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    fn conn(&self) -> Result<Conn> {
        Ok(self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?)
    }

    fn write_conn(&self) -> Result<Conn> {
        let mut conn = self.conn()?;
        if let Err(e) = configure_sqlite_connection(&mut conn, self.busy_timeout_ms) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }
        Ok(conn)
    }
}

fn db_err(e: diesel::result::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i64> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}

impl Store for SqliteStore {
    fn fetch_all_devices(&self) -> Result<Vec<Device>> {
        let mut conn = self.conn()?;
        let rows: Vec<DeviceRow> = devices::table
            .select(DeviceRow::as_select())
            .order(devices::id.asc())
            .load(&mut conn)
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Device::from).collect())
    }

    fn fetch_device_by_unique_id(&self, unique_id: &str) -> Result<Option<Device>> {
        let mut conn = self.conn()?;
        let row: Option<DeviceRow> = devices::table
            .filter(devices::unique_id.eq(unique_id))
            .select(DeviceRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;
        Ok(row.map(Device::from))
    }

    fn fetch_all_permissions(&self) -> Result<Vec<Permission>> {
        let mut conn = self.conn()?;
        let rows: Vec<UserDeviceRow> = user_devices::table
            .select(UserDeviceRow::as_select())
            .load(&mut conn)
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|row| Permission::new(UserId::new(row.user_id), DeviceId::new(row.device_id)))
            .collect())
    }

    fn insert_position(&self, position: &Position) -> Result<Option<PositionId>> {
        if !self.statements.insert_position {
            return Ok(None);
        }

        // Device time and fix time both carry the reported fix timestamp.
        let reported = position.fix_time().to_rfc3339();
        let fix = position.fix();
        let row = NewPositionRow {
            device_id: position.device_id().value(),
            protocol: position.protocol(),
            server_time: Utc::now().to_rfc3339(),
            device_time: reported.clone(),
            fix_time: reported,
            valid: fix.valid,
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: fix.altitude,
            speed: fix.speed,
            course: fix.course,
            address: position.address(),
            other: position.other(),
        };

        let mut conn = self.write_conn()?;
        let id = conn
            .transaction(|conn| {
                diesel::insert_into(positions::table)
                    .values(&row)
                    .execute(conn)?;
                last_insert_rowid(conn)
            })
            .map_err(db_err)?;

        Ok(Some(PositionId::new(id)))
    }

    fn update_device_latest_position(
        &self,
        device_id: DeviceId,
        position_id: PositionId,
    ) -> Result<bool> {
        if !self.statements.update_latest_position {
            return Ok(false);
        }

        let mut conn = self.write_conn()?;
        let updated = diesel::update(devices::table.find(device_id.value()))
            .set(devices::position_id.eq(Some(position_id.value())))
            .execute(&mut conn)
            .map_err(db_err)?;
        Ok(updated > 0)
    }
}

impl DeviceAdmin for SqliteStore {
    fn add_device(&self, device: &NewDevice) -> Result<Device> {
        let row = NewDeviceRow {
            name: device.name(),
            unique_id: device.unique_id().as_str(),
        };

        let mut conn = self.write_conn()?;
        let id = conn
            .transaction(|conn| {
                diesel::insert_into(devices::table)
                    .values(&row)
                    .execute(conn)?;
                last_insert_rowid(conn)
            })
            .map_err(db_err)?;

        Ok(Device::new(
            DeviceId::new(id),
            device.unique_id().clone(),
            device.name(),
        ))
    }

    fn update_device(&self, device: &Device) -> Result<bool> {
        let mut conn = self.write_conn()?;
        let updated = diesel::update(devices::table.find(device.id.value()))
            .set((
                devices::name.eq(device.name.as_str()),
                devices::unique_id.eq(device.unique_id.as_str()),
            ))
            .execute(&mut conn)
            .map_err(db_err)?;
        Ok(updated > 0)
    }

    fn remove_device(&self, device_id: DeviceId) -> Result<bool> {
        let mut conn = self.write_conn()?;
        let deleted = conn
            .transaction(|conn| {
                diesel::delete(user_devices::table.filter(user_devices::device_id.eq(device_id.value())))
                    .execute(conn)?;
                diesel::delete(devices::table.find(device_id.value())).execute(conn)
            })
            .map_err(db_err)?;
        Ok(deleted > 0)
    }

    fn link_device(&self, user_id: UserId, device_id: DeviceId) -> Result<()> {
        let row = UserDeviceRow {
            user_id: user_id.value(),
            device_id: device_id.value(),
        };

        let mut conn = self.write_conn()?;
        diesel::insert_or_ignore_into(user_devices::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(db_err)?;
        Ok(())
    }

    fn devices_for_user(&self, user_id: UserId) -> Result<Vec<Device>> {
        let mut conn = self.conn()?;
        let linked = user_devices::table
            .filter(user_devices::user_id.eq(user_id.value()))
            .select(user_devices::device_id);
        let rows: Vec<DeviceRow> = devices::table
            .filter(devices::id.eq_any(linked))
            .select(DeviceRow::as_select())
            .order(devices::id.asc())
            .load(&mut conn)
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Device::from).collect())
    }
}

impl UserAdmin for SqliteStore {
    fn add_user(&self, user: &NewUser) -> Result<User> {
        let password = user.password();
        let row = NewUserRow {
            name: user.name(),
            email: user.email(),
            password_hash: password.hash(),
            password_salt: password.salt(),
            admin: user.admin(),
        };

        let mut conn = self.write_conn()?;
        let id = conn
            .transaction(|conn| {
                diesel::insert_into(users::table).values(&row).execute(conn)?;
                last_insert_rowid(conn)
            })
            .map_err(db_err)?;

        Ok(user.clone().into_user(UserId::new(id)))
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let mut conn = self.conn()?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.trim()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_err)?;

        Ok(row
            .filter(|row| row.password().verify(password))
            .map(User::from))
    }
}
