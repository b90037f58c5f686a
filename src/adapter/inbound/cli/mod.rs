//! Command-line adapter.
//!
//! Each handler writes JSON lines to the writer it is given, so the same
//! code serves the binary (stdout) and tests (a byte buffer).

pub mod command;
pub mod device;
pub mod ingest;
pub mod migrate;
pub mod output;
pub mod permissions;
pub mod resolve;
pub mod user;

use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::bootstrap::Tracker;
use crate::infrastructure::config::settings::Config;
use command::Commands;

/// Dispatch a parsed command against the configured store.
pub fn execute<W: Write>(command: Commands, config: &Config, out: &mut W) -> Result<()> {
    debug!(?command, "Executing command");
    match command {
        Commands::Migrate => migrate::execute(config, out),
        Commands::Ingest(args) => {
            ingest::execute(&Tracker::open(config)?, args.input.as_deref(), out)
        }
        Commands::Resolve { unique_id } => {
            resolve::execute(&Tracker::open(config)?, &unique_id, out)
        }
        Commands::Device(command) => device::execute(&Tracker::open(config)?, command, out),
        Commands::Permissions(command) => {
            permissions::execute(&Tracker::open_with_permissions(config)?, command, out)
        }
        Commands::User(command) => user::execute(&Tracker::open(config)?, command, out),
    }
}
