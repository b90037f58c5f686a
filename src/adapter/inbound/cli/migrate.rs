//! Handler for the `migrate` command.

use std::io::Write;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::init_pool;
use crate::infrastructure::config::settings::Config;

/// Open the configured database and apply pending migrations.
pub fn execute<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    init_pool(config)?;
    output::emit(out, "migrated", &json!({ "database": config.database.url }))
}
