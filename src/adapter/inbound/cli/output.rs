//! JSON-lines command output.
//!
//! Every line a command prints is an object of the form
//! `{"type": <kind>, "payload": <value>}` so results can be piped into
//! other tools without parsing prose.

use std::io::Write;

use serde::Serialize;
use serde_json::json;

use crate::error::Result;

/// Write one `{"type", "payload"}` line.
pub fn emit<W: Write, T: Serialize>(out: &mut W, kind: &str, payload: &T) -> Result<()> {
    let line = json!({
        "type": kind,
        "payload": payload,
    });
    writeln!(out, "{line}")?;
    Ok(())
}

/// Print a fatal error to stderr in the same line format.
pub fn error(message: &str) {
    eprintln!(
        "{}",
        json!({
            "type": "error",
            "payload": { "message": message },
        })
    );
}
