//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Thread management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List stored threads, most recent first
    Threads,
    /// Show one thread with its answers grouped by layer
    Show {
        /// Thread id (or its 1-based position in `threads`)
        id: String,
    },
    /// Delete a stored thread
    Delete {
        /// Thread id (or its 1-based position in `threads`)
        id: String,
    },
}

/// CLI arguments for layers
#[derive(Parser, Debug)]
#[command(name = "layers")]
#[command(author, version, about = "Reflective journaling - dig from what happened to what's underneath")]
#[command(long_about = r#"
Layers is a reflective journal. Write a brain dump of what's on your mind,
then answer one follow-up question at a time. The first questions gather the
situation; later ones move toward the feelings and beliefs underneath.
Say you've hit a root (/root) and the next questions gently challenge it.

Questions come from a language model reached through the layers relay; no
credential is stored on this machine.

Configuration files are loaded from (in priority order):
1. LAYERS_* environment variables (e.g. LAYERS_RELAY__ENDPOINT)
2. --config <path>     Explicit config file
3. ./layers.toml       Project-level config
4. ~/.config/layers/config.toml   Global config

Example:
  layers
  layers "I feel like everything is falling apart at once and I can't keep up"
  layers --relay https://relay.example.com
  layers threads
"#)]
pub struct Cli {
    /// Brain dump to start a new thread with (prompted for when omitted)
    pub brain_dump: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and effective settings, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Relay base URL (overrides relay.endpoint)
    #[arg(long, value_name = "URL", global = true)]
    pub relay: Option<String>,

    /// Write operational logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}
