//! SQLite persistence adapter.
//!
//! Provides the SQLite-backed [`Store`](crate::port::Store) and
//! [`DeviceAdmin`](crate::port::DeviceAdmin) implementation using Diesel ORM.

pub mod database;
pub mod store;

pub use store::{SqliteStore, WriteStatements};
