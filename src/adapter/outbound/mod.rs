//! Outbound adapters (driven side).
//!
//! - [`sqlite`] - Diesel/SQLite store used in production
//! - [`memory`] - In-memory store for tests and dry runs

pub mod memory;
pub mod sqlite;
