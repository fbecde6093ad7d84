//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured summaries).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "binfill", version, about = "Waste bin fill-level monitor")]
pub struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE", default_value = "etc/binfill.toml")]
    pub config: PathBuf,

    /// Emit the run summary (and logs) as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitoring loop
    Run {
        /// Stop after this many scheduler ticks (runs until Ctrl-C if unset)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,

        /// Override the bin id from the config
        #[arg(long, value_name = "ID")]
        bin_id: Option<String>,

        /// Demo/testing: inject a remote reset command after this many ticks
        #[arg(long, value_name = "TICK")]
        inject_reset_at: Option<u64>,
    },
    /// Print the last persisted measurement
    Show,
    /// Validate the config and tick a simulated monitor once
    SelfCheck,
}
