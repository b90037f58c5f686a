//! Handler for the `resolve` command.

use std::io::Write;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::Tracker;

/// Resolve `unique_id` through the device cache and print the device.
pub fn execute<W: Write>(tracker: &Tracker, unique_id: &str, out: &mut W) -> Result<()> {
    match tracker.devices().resolve(unique_id)? {
        Some(device) => output::emit(out, "device", &device),
        None => output::emit(out, "unknown_device", &json!({ "unique_id": unique_id })),
    }
}
