use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::{DeviceId, UserId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures of the backing store.
///
/// Any of these means the store could not answer; callers decide whether to
/// propagate (device cache) or degrade (permission index).
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("access denied for user {user_id} to devices {device_ids:?}")]
    AuthorizationDenied {
        user_id: UserId,
        device_ids: Vec<DeviceId>,
    },

    #[error("invalid email or password")]
    AuthenticationFailed,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error is a denied authorization check.
    #[must_use]
    pub fn is_authorization_denied(&self) -> bool {
        matches!(self, Self::AuthorizationDenied { .. })
    }

    /// True when a login was rejected.
    #[must_use]
    pub fn is_authentication_failed(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    /// True when the error came from the backing store.
    #[must_use]
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
