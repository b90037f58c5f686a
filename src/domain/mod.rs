//! Store-agnostic domain types: devices, permissions, positions, users.
//!
//! Nothing in this module performs I/O. Construction of values with
//! invariants goes through `try_new` constructors returning [`error::DomainError`].

pub mod device;
pub mod error;
pub mod id;
pub mod password;
pub mod permission;
pub mod position;
pub mod user;

pub use device::{Device, NewDevice};
pub use error::DomainError;
pub use id::{DeviceId, PositionId, UniqueId, UserId};
pub use password::PasswordHash;
pub use permission::{CheckPolicy, Permission};
pub use position::{Fix, Position, PositionReport};
pub use user::{NewUser, User};
