//! Command-line interface definitions.
//!
//! Defines the CLI structure for the trackwell binary using `clap`. Every
//! subcommand reads the same TOML configuration file.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Device tracking store maintenance CLI
#[derive(Parser, Debug)]
#[command(name = "trackwell")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the trackwell CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run pending database migrations
    Migrate,

    /// Ingest JSON-lines position reports
    Ingest(IngestArgs),

    /// Resolve a device by its unique id through the cache
    Resolve {
        /// Hardware identifier reported by the device (e.g. IMEI).
        unique_id: String,
    },

    /// Manage devices and user links
    #[command(subcommand)]
    Device(DeviceCommand),

    /// Inspect and check user permissions
    #[command(subcommand)]
    Permissions(PermissionsCommand),

    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommand),
}

/// Arguments for the `ingest` subcommand.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Read reports from this file instead of stdin.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Subcommands for `trackwell device`.
#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    /// Register a new device.
    Add {
        /// Hardware identifier reported by the device.
        unique_id: String,
        /// Display name.
        #[arg(short, long)]
        name: String,
    },
    /// Change the name or unique id of an existing device.
    Update {
        /// Device id.
        id: i64,
        /// New hardware identifier.
        #[arg(long)]
        unique_id: String,
        /// New display name.
        #[arg(short, long)]
        name: String,
    },
    /// Delete a device and its user links.
    Remove {
        /// Device id.
        id: i64,
    },
    /// Grant a user access to a device.
    Link {
        /// User id.
        #[arg(short, long)]
        user: i64,
        /// Device id.
        #[arg(short, long)]
        device: i64,
    },
    /// List devices, optionally only those linked to a user.
    List {
        /// Only devices linked to this user.
        #[arg(short, long)]
        user: Option<i64>,
    },
}

/// Subcommands for `trackwell permissions`.
#[derive(Subcommand, Debug)]
pub enum PermissionsCommand {
    /// Print the device ids a user may access.
    Allowed {
        /// User id.
        #[arg(short, long)]
        user: i64,
    },
    /// Run the authorization check for one or more devices.
    Check {
        /// User id.
        #[arg(short, long)]
        user: i64,
        /// Device ids; several are checked as one batch.
        #[arg(short, long = "device", required = true, num_args = 1..)]
        devices: Vec<i64>,
    },
}

/// Subcommands for `trackwell user`.
#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user account.
    Add {
        /// Login email, unique across users.
        email: String,
        /// Display name.
        #[arg(short, long, default_value = "")]
        name: String,
        /// Plain-text password; only its salted hash is stored.
        #[arg(short, long)]
        password: String,
        /// Grant administrator rights.
        #[arg(long)]
        admin: bool,
    },
    /// Check an email and password, printing the user on success.
    Login {
        /// Login email.
        email: String,
        #[arg(short, long)]
        password: String,
    },
}
