//! Handlers for `device` subcommands.

use std::io::Write;

use serde_json::json;

use super::command::DeviceCommand;
use super::output;
use crate::domain::{Device, DeviceId, NewDevice, UserId};
use crate::error::Result;
use crate::infrastructure::bootstrap::Tracker;

/// Execute a device administration command.
pub fn execute<W: Write>(tracker: &Tracker, command: DeviceCommand, out: &mut W) -> Result<()> {
    let admin = tracker.admin();
    match command {
        DeviceCommand::Add { unique_id, name } => {
            let device = admin.add_device(&NewDevice::try_new(unique_id, name)?)?;
            output::emit(out, "device", &device)
        }
        DeviceCommand::Update {
            id,
            unique_id,
            name,
        } => {
            let draft = NewDevice::try_new(unique_id, name)?;
            let device = Device::new(DeviceId::new(id), draft.unique_id().clone(), draft.name());
            let updated = admin.update_device(&device)?;
            output::emit(out, "updated", &json!({ "id": id, "updated": updated }))
        }
        DeviceCommand::Remove { id } => {
            let removed = admin.remove_device(DeviceId::new(id))?;
            output::emit(out, "removed", &json!({ "id": id, "removed": removed }))
        }
        DeviceCommand::Link { user, device } => {
            admin.link_device(UserId::new(user), DeviceId::new(device))?;
            output::emit(out, "linked", &json!({ "user_id": user, "device_id": device }))
        }
        DeviceCommand::List { user } => {
            let devices = match user {
                Some(user) => admin.devices_for_user(UserId::new(user))?,
                None => tracker.store().fetch_all_devices()?,
            };
            for device in &devices {
                output::emit(out, "device", device)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::error::Error;
    use crate::infrastructure::config::settings::Config;
    use crate::testkit::clock::ManualClock;

    fn lines(out: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn tracker(store: Arc<MemoryStore>) -> Tracker {
        Tracker::with_store(store, &Config::default(), Arc::new(ManualClock::at_epoch()))
    }

    #[test]
    fn add_link_and_list_for_user() {
        let tracker = tracker(Arc::new(MemoryStore::new()));
        let mut out = Vec::new();

        execute(
            &tracker,
            DeviceCommand::Add {
                unique_id: "IMEI-A".into(),
                name: "van".into(),
            },
            &mut out,
        )
        .unwrap();
        let id = lines(std::mem::take(&mut out))[0]["payload"]["id"].as_i64().unwrap();

        execute(&tracker, DeviceCommand::Link { user: 3, device: id }, &mut out).unwrap();
        out.clear();
        execute(&tracker, DeviceCommand::List { user: Some(3) }, &mut out).unwrap();

        let listed = lines(out);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["payload"]["unique_id"], "IMEI-A");
        assert_eq!(listed[0]["payload"]["name"], "van");
    }

    #[test]
    fn add_rejects_blank_unique_id() {
        let tracker = tracker(Arc::new(MemoryStore::new()));

        let result = execute(
            &tracker,
            DeviceCommand::Add {
                unique_id: "  ".into(),
                name: "van".into(),
            },
            &mut Vec::new(),
        );

        assert!(matches!(result, Err(Error::Domain(_))));
    }

    #[test]
    fn remove_reports_missing_device() {
        let tracker = tracker(Arc::new(MemoryStore::new()));
        let mut out = Vec::new();

        execute(&tracker, DeviceCommand::Remove { id: 99 }, &mut out).unwrap();

        assert_eq!(lines(out)[0]["payload"]["removed"], false);
    }
}
