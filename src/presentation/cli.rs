//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - `shipyard` with no subcommand is a deploy; `-c` forces a clean slate
//! - Consent flags answer confirmations when no terminal is attached

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Shipyard - provision, configure and verify a single-host deployment
#[derive(Parser, Debug)]
#[command(name = "shipyard")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'shipyard' without a subcommand to deploy.")]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./shipyard.toml, then ~/.config/shipyard/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root holding the terraform and ansible directories
    #[arg(short = 'C', long, global = true, default_value = ".", value_name = "DIR")]
    pub project: PathBuf,

    /// Never prompt; confirmations are answered by the consent flags below
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Consent to releasing a held state lock
    #[arg(long, global = true)]
    pub force_unlock: bool,

    /// Consent to destroy-and-clean after a failed run
    #[arg(long, global = true)]
    pub cleanup_on_failure: bool,

    /// Destroy existing infrastructure before provisioning
    #[arg(short = 'c', long = "clean")]
    pub clean: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Provision, configure and verify (the default)
    Deploy {
        /// Destroy existing infrastructure before provisioning
        #[arg(short = 'c', long)]
        clean: bool,
    },

    /// Release a stale state lock
    Unlock {
        /// Lock id to release; detected from the backend when omitted
        lock_id: Option<String>,
    },

    /// Destroy everything the shared state tracks
    Destroy {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the state lock holder and tracked resources
    Status,
}

impl Cli {
    /// The subcommand to run; a bare invocation deploys.
    pub fn resolved_command(&self) -> Commands {
        match &self.command {
            Some(Commands::Deploy { clean }) => Commands::Deploy {
                clean: *clean || self.clean,
            },
            Some(other) => other.clone(),
            None => Commands::Deploy { clean: self.clean },
        }
    }
}
