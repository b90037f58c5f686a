use trackwell::domain::{Device, NewDevice, UserId};
use trackwell::port::DeviceAdmin;

/// Register `unique_id` through the admin port and return the stored device.
pub fn add_device(admin: &dyn DeviceAdmin, unique_id: &str) -> Device {
    let draft = NewDevice::try_new(unique_id, format!("device {unique_id}")).expect("valid device");
    admin.add_device(&draft).expect("add device")
}

/// Link `user_id` to every device in `devices`.
pub fn link_all(admin: &dyn DeviceAdmin, user_id: i64, devices: &[&Device]) {
    for device in devices {
        admin
            .link_device(UserId::new(user_id), device.id)
            .expect("link device");
    }
}

/// One JSON-lines report as the ingest command reads it.
pub fn report_line(unique_id: &str, second: u32, latitude: f64, longitude: f64) -> String {
    format!(
        r#"{{"unique_id":"{unique_id}","protocol":"osmand","fix_time":"2026-03-01T12:00:{second:02}Z","latitude":{latitude},"longitude":{longitude},"speed":3.5}}"#
    )
}
