//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`clock`] - `ManualClock`, a [`Clock`](crate::port::Clock) tests advance by hand.
//! - [`store`] - `CountingStore`, a [`Store`](crate::port::Store) wrapper that
//!   counts calls and can be switched into failure mode.
//! - [`domain`] - Builders for devices, positions and reports.

pub mod clock;
pub mod domain;
pub mod store;
