//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use trackwell::domain::error::DomainError;
//! use trackwell::domain::id::DeviceId;
//! use trackwell::domain::position::{Fix, Position};
//!
//! let fix = Fix { latitude: 91.0, longitude: 0.0, ..Fix::default() };
//! let result = Position::try_new(DeviceId::new(1), "gt06", Utc::now(), Utc::now(), fix);
//!
//! assert!(matches!(result, Err(DomainError::LatitudeOutOfRange { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Devices must carry a non-empty unique identifier.
    #[error("device unique id cannot be empty")]
    EmptyUniqueId,

    /// Users log in by email, so it cannot be blank.
    #[error("user email cannot be empty")]
    EmptyEmail,

    #[error("user password cannot be empty")]
    EmptyPassword,

    /// Latitude must lie within [-90, 90].
    #[error("latitude {latitude} out of range [-90, 90]")]
    LatitudeOutOfRange {
        /// The invalid latitude that was provided.
        latitude: f64,
    },

    /// Longitude must lie within [-180, 180].
    #[error("longitude {longitude} out of range [-180, 180]")]
    LongitudeOutOfRange {
        /// The invalid longitude that was provided.
        longitude: f64,
    },
}
