//! Handler for the `ingest` command.
//!
//! Reads one JSON [`PositionReport`] per line. Malformed lines and reports
//! with out-of-range coordinates are counted as rejected and skipped; store
//! failures abort the run.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde_json::json;
use tracing::{info, warn};

use super::output;
use crate::application::ingest::{IngestSummary, PositionIngest};
use crate::domain::PositionReport;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::Tracker;

/// Ingest reports from `input`, or stdin when no file is given.
pub fn execute<W: Write>(tracker: &Tracker, input: Option<&Path>, out: &mut W) -> Result<()> {
    let summary = match input {
        Some(path) => ingest_lines(tracker.ingest(), BufReader::new(File::open(path)?), out)?,
        None => ingest_lines(tracker.ingest(), std::io::stdin().lock(), out)?,
    };
    info!(
        stored = summary.stored,
        not_recorded = summary.not_recorded,
        unknown_devices = summary.unknown_devices,
        rejected = summary.rejected,
        "Ingest finished"
    );
    output::emit(out, "summary", &summary)?;
    Ok(())
}

/// Ingest every non-blank line of `reader`, printing one outcome per line.
///
/// Lines that are not UTF-8, not JSON, or carry invalid coordinates are
/// counted as rejected. Read failures and store failures abort the run.
pub fn ingest_lines<R: BufRead, W: Write>(
    ingest: &PositionIngest,
    mut reader: R,
    out: &mut W,
) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                reject(out, &mut summary, line_number, &e)?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let report: PositionReport = match serde_json::from_str(line) {
            Ok(report) => report,
            Err(e) => {
                reject(out, &mut summary, line_number, &e)?;
                continue;
            }
        };

        match ingest.ingest(report) {
            Ok(outcome) => {
                summary.record(&outcome);
                output::emit(out, "ingested", &outcome)?;
            }
            Err(Error::Domain(e)) => reject(out, &mut summary, line_number, &e)?,
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

fn reject<W: Write>(
    out: &mut W,
    summary: &mut IngestSummary,
    line_number: usize,
    error: &dyn std::fmt::Display,
) -> Result<()> {
    warn!(line = line_number, error = %error, "Rejected report");
    summary.rejected += 1;
    output::emit(out, "rejected", &json!({ "line": line_number, "error": error.to_string() }))
}
