//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{devices, positions, user_devices, users};
use crate::domain::{Device, DeviceId, PasswordHash, PositionId, UniqueId, User, UserId};

/// Database row for a device.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = devices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DeviceRow {
    pub id: i64,
    pub name: String,
    pub unique_id: String,
    pub position_id: Option<i64>,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Self {
            id: DeviceId::new(row.id),
            unique_id: UniqueId::new(row.unique_id),
            name: row.name,
            position_id: row.position_id.map(PositionId::new),
        }
    }
}

/// Database row for a device (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = devices)]
pub struct NewDeviceRow<'a> {
    pub name: &'a str,
    pub unique_id: &'a str,
}

/// Database row for a user/device link.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, Copy)]
#[diesel(table_name = user_devices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDeviceRow {
    pub user_id: i64,
    pub device_id: i64,
}

/// Database row for a position (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = positions)]
pub struct NewPositionRow<'a> {
    pub device_id: i64,
    pub protocol: &'a str,
    pub server_time: String,
    pub device_time: String,
    pub fix_time: String,
    pub valid: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: f64,
    pub course: f64,
    pub address: Option<&'a str>,
    pub other: Option<&'a str>,
}

/// Database row for a position (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionRow {
    pub id: i64,
    pub device_id: i64,
    pub protocol: String,
    pub server_time: String,
    pub device_time: String,
    pub fix_time: String,
    pub valid: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: f64,
    pub course: f64,
    pub address: Option<String>,
    pub other: Option<String>,
}

/// Database row for a user, including its password material.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub admin: bool,
}

impl UserRow {
    pub fn password(&self) -> PasswordHash {
        PasswordHash::from_parts(self.password_hash.as_str(), self.password_salt.as_str())
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            admin: row.admin,
        }
    }
}

/// Database row for a user (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub password_salt: &'a str,
    pub admin: bool,
}
