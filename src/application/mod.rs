//! Application services (use cases).
//!
//! These services sit on top of the [`Store`](crate::port::Store) port and
//! keep the hot path (device resolution, authorization) in memory.

pub mod cache;
pub mod ingest;
pub mod position;
