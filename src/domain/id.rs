//! Domain identifier types with proper encapsulation.
//!
//! Store-assigned ids are `i64` newtypes so a device id can never be passed
//! where a user or position id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw id value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self::new(id)
            }
        }
    };
}

numeric_id!(
    /// Internal device identifier assigned by the store.
    DeviceId
);

numeric_id!(
    /// User identifier as stored in the user/device link table.
    UserId
);

numeric_id!(
    /// Identifier generated by the store when a position row is inserted.
    PositionId
);

/// External device identifier reported by the hardware (IMEI, serial, ...).
///
/// Opaque: no format validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(String);

impl UniqueId {
    /// Create a new `UniqueId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the unique id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UniqueId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for UniqueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::borrow::Borrow<str> for UniqueId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_display_raw_value() {
        assert_eq!(DeviceId::new(42).to_string(), "42");
        assert_eq!(UserId::from(7).value(), 7);
        assert_eq!(PositionId::new(-1).value(), -1);
    }

    #[test]
    fn unique_id_borrows_as_str() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(UniqueId::new("IMEI-A"), 1);
        assert_eq!(map.get("IMEI-A"), Some(&1));
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&DeviceId::new(3)).unwrap();
        assert_eq!(json, "3");
        let id: UniqueId = serde_json::from_str("\"123456789012345\"").unwrap();
        assert_eq!(id.as_str(), "123456789012345");
    }
}
