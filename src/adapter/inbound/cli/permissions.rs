//! Handlers for `permissions` subcommands.

use std::io::Write;

use serde_json::json;

use super::command::PermissionsCommand;
use super::output;
use crate::domain::{DeviceId, UserId};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::Tracker;

/// Execute a permissions command.
///
/// A denied check is printed as a result rather than returned as an error.
pub fn execute<W: Write>(
    tracker: &Tracker,
    command: PermissionsCommand,
    out: &mut W,
) -> Result<()> {
    let index = tracker.permissions();
    match command {
        PermissionsCommand::Allowed { user } => {
            let mut devices: Vec<DeviceId> =
                index.allowed_devices(UserId::new(user)).into_iter().collect();
            devices.sort();
            output::emit(out, "allowed", &json!({ "user_id": user, "device_ids": devices }))
        }
        PermissionsCommand::Check { user, devices } => {
            let device_ids: Vec<DeviceId> = devices.into_iter().map(DeviceId::new).collect();
            let granted = match index.check_devices(UserId::new(user), &device_ids) {
                Ok(()) => true,
                Err(Error::AuthorizationDenied { .. }) => false,
                Err(e) => return Err(e),
            };
            output::emit(
                out,
                "check",
                &json!({
                    "user_id": user,
                    "device_ids": device_ids,
                    "policy": index.policy(),
                    "granted": granted,
                }),
            )
        }
    }
}
