// ABOUTME: CLI argument parsing and command routing for byoman
//
// Provides command-line interface for:
// - Launching the TUI (tui, default)
// - Printing the current byobu sessions once (list)

pub mod list;

use crate::config::AppConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Terminal front-end for byobu sessions
#[derive(Parser, Debug)]
#[command(name = "byoman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colors (also enabled by the NO_COLOR environment variable)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Seconds between automatic session refreshes
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub refresh_secs: Option<u64>,

    /// byobu executable to invoke
    #[arg(long, global = true, value_name = "PATH")]
    pub binary: Option<String>,

    /// Extra config file, read after the standard locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Flags win over every config file and the environment
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if self.no_color {
            config.ui.no_color = true;
        }
        if let Some(secs) = self.refresh_secs {
            config.refresh_interval_secs = secs;
        }
        if let Some(binary) = &self.binary {
            config.binary.clone_from(binary);
        }
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// List byobu sessions and exit
    List,
}
