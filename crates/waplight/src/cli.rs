//! Clap derive structures for the `waplight` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// waplight -- UniFi access point status LEDs as on/off lights
#[derive(Debug, Parser)]
#[command(
    name = "waplight",
    version,
    about = "Bridge UniFi access point status LEDs to on/off light accessories",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the platform config file (JSON)
    #[arg(long, short = 'c', env = "WAPLIGHT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a discovery pass and reconcile the accessory cache
    Discover,

    /// Read the LED state of one access point
    Get {
        /// Controller device identifier
        id: String,
    },

    /// Force the LED state of one access point
    Set {
        /// Controller device identifier
        id: String,

        /// Desired LED state
        state: LedState,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LedState {
    On,
    Off,
}

impl LedState {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}
