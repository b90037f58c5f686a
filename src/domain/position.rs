//! Position facts and the inbound reports they are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{DeviceId, UniqueId};

/// Navigation values of a single fix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub valid: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: f64,
    pub course: f64,
}

/// An immutable position fact for a resolved device.
///
/// Positions are never mutated or deleted by this crate; all construction
/// goes through [`Position::try_new`] so coordinates are always in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    device_id: DeviceId,
    protocol: String,
    device_time: DateTime<Utc>,
    fix_time: DateTime<Utc>,
    fix: Fix,
    address: Option<String>,
    other: Option<String>,
}

impl Position {
    /// Create a validated position.
    ///
    /// # Errors
    /// Returns an error if latitude or longitude are out of range.
    pub fn try_new(
        device_id: DeviceId,
        protocol: impl Into<String>,
        device_time: DateTime<Utc>,
        fix_time: DateTime<Utc>,
        fix: Fix,
    ) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&fix.latitude) {
            return Err(DomainError::LatitudeOutOfRange {
                latitude: fix.latitude,
            });
        }
        if !(-180.0..=180.0).contains(&fix.longitude) {
            return Err(DomainError::LongitudeOutOfRange {
                longitude: fix.longitude,
            });
        }
        Ok(Self {
            device_id,
            protocol: protocol.into(),
            device_time,
            fix_time,
            fix,
            address: None,
            other: None,
        })
    }

    /// Attach a resolved street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach the free-form protocol payload.
    #[must_use]
    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other = Some(other.into());
        self
    }

    #[must_use]
    pub const fn device_id(&self) -> DeviceId {
        self.device_id
    }

    #[must_use]
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    #[must_use]
    pub const fn device_time(&self) -> DateTime<Utc> {
        self.device_time
    }

    #[must_use]
    pub const fn fix_time(&self) -> DateTime<Utc> {
        self.fix_time
    }

    #[must_use]
    pub const fn fix(&self) -> &Fix {
        &self.fix
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub fn other(&self) -> Option<&str> {
        self.other.as_deref()
    }
}

/// A position report as received from the ingest pipeline, before the
/// device has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReport {
    pub unique_id: UniqueId,
    #[serde(default)]
    pub protocol: String,
    /// Time the device claims; falls back to `fix_time` when absent.
    #[serde(default)]
    pub device_time: Option<DateTime<Utc>>,
    pub fix_time: DateTime<Utc>,
    #[serde(default)]
    pub valid: bool,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub course: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub other: Option<serde_json::Value>,
}

impl PositionReport {
    /// Bind the report to a resolved device.
    ///
    /// # Errors
    /// Returns an error if the reported coordinates are out of range.
    pub fn into_position(self, device_id: DeviceId) -> Result<Position, DomainError> {
        let fix = Fix {
            valid: self.valid,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            speed: self.speed,
            course: self.course,
        };
        let mut position = Position::try_new(
            device_id,
            self.protocol,
            self.device_time.unwrap_or(self.fix_time),
            self.fix_time,
            fix,
        )?;
        if let Some(address) = self.address {
            position = position.with_address(address);
        }
        match self.other {
            Some(serde_json::Value::String(s)) => position = position.with_other(s),
            Some(serde_json::Value::Null) | None => {}
            Some(value) => position = position.with_other(value.to_string()),
        }
        Ok(position)
    }
}
