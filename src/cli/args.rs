//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use crate::config::TrimMode;

/// Course hierarchy viewer: assembles programme, course and unit enrolment
/// records into a collapsible tree
#[derive(Parser, Debug)]
#[command(name = "coursetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the course hierarchy for a user
    Tree {
        /// Records snapshot file (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,

        /// Platform username
        #[arg(short, long, default_value = "student")]
        user: String,

        /// Platform user id
        #[arg(long, default_value_t = 0)]
        user_id: u64,

        /// Override the configured trim mode
        #[arg(long, value_enum)]
        trim_mode: Option<TrimMode>,

        /// Override the configured trim length
        #[arg(long)]
        trim_length: Option<usize>,
    },

    /// List records that could not be attached to the hierarchy
    Orphans {
        /// Records snapshot file (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        snapshot: PathBuf,

        /// Platform username
        #[arg(short, long, default_value = "student")]
        user: String,

        /// Platform user id
        #[arg(long, default_value_t = 0)]
        user_id: u64,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective settings as TOML
    Show,
}
