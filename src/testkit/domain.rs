//! Builders for domain primitives.

use chrono::{TimeZone, Utc};

use crate::domain::{Device, DeviceId, Fix, Position, PositionReport, UniqueId};

/// Device with the given id and unique id, named after the unique id.
pub fn device(id: i64, unique_id: &str) -> Device {
    Device::new(DeviceId::new(id), unique_id, format!("device {unique_id}"))
}

/// Valid position for `device_id` at a fixed instant.
pub fn position_for(device_id: i64) -> Position {
    let time = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    Position::try_new(
        DeviceId::new(device_id),
        "osmand",
        time,
        time,
        Fix {
            valid: true,
            latitude: 52.52,
            longitude: 13.405,
            altitude: 34.0,
            speed: 12.5,
            course: 270.0,
        },
    )
    .unwrap()
}

/// Position whose speed encodes `tag`, so a stored row can be traced back
/// to the call that produced it.
pub fn tagged_position(device_id: i64, tag: u32) -> Position {
    let time = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    Position::try_new(
        DeviceId::new(device_id),
        "osmand",
        time,
        time,
        Fix {
            valid: true,
            latitude: 10.0,
            longitude: 20.0,
            altitude: 0.0,
            speed: f64::from(tag),
            course: 0.0,
        },
    )
    .unwrap()
    .with_other(format!("tag-{tag}"))
}

/// Report from `unique_id` with valid coordinates.
pub fn report(unique_id: &str) -> PositionReport {
    PositionReport {
        unique_id: UniqueId::new(unique_id),
        protocol: "osmand".into(),
        device_time: None,
        fix_time: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        valid: true,
        latitude: 52.52,
        longitude: 13.405,
        altitude: 0.0,
        speed: 0.0,
        course: 0.0,
        address: None,
        other: None,
    }
}
