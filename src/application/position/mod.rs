//! Position write path.
//!
//! Persisting a position is two ordered, independent store calls: append the
//! row, then repoint the device's latest position. There is no transaction
//! across the two; a failure in between leaves an unreferenced row, which
//! the next successful write repairs.

pub mod writer;

pub use writer::PositionWriter;
