//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!                 │         Application          │
//!                 │  DeviceCache PermissionIndex │
//!                 │  PositionWriter  Ingest      │
//!                 └──────────────┬───────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌─────────────┐                 ┌─────────────┐
//!         │    Store    │                 │    Clock    │
//!         │   Adapter   │                 │             │
//!         └─────────────┘                 └─────────────┘
//! ```

pub mod outbound;

pub use outbound::clock::{Clock, SystemClock};
pub use outbound::store::{DeviceAdmin, Store, UserAdmin};
