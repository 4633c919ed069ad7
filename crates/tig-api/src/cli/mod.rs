//! CLI command definitions for the `tig-advisor` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the function
//! endpoints; the other commands run the same services once from the shell.

pub mod manifest;
pub mod setup;
pub mod watch;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Get a DM whenever a TIG announcement is posted in a watched channel.
#[derive(Parser)]
#[command(name = "tig-advisor", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the function endpoint server.
    Serve {
        /// Port to listen on (defaults to server.port from config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to server.host from config).
        #[arg(long)]
        host: Option<String>,
    },

    /// Register a channel listener, as the setup workflow does.
    Setup {
        /// Channel to watch for announcements.
        #[arg(long)]
        channel: String,

        /// User to alert when an announcement is posted.
        #[arg(long)]
        user: Option<String>,
    },

    /// Send an alert DM, as a firing watch does.
    Dispatch {
        /// Channel the announcement was posted in.
        #[arg(long)]
        channel: String,

        /// User to alert.
        #[arg(long)]
        user: String,
    },

    /// List alert watches registered with the platform.
    Watches,

    /// List alert routes saved for a channel.
    Routes {
        /// Channel id.
        channel: String,
    },

    /// Print the app manifest.
    Manifest,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
