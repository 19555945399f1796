//! Command-line interface definitions for dirsnap.
//!
//! The definitions are shared between the main binary and build tools (like
//! xtask) for man page generation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for dirsnap.
#[derive(Parser)]
#[command(
    name = "dirsnap",
    version = crate::VERSION,
    about = "Snapshot a directory and report what changed since",
    long_about = "Fingerprints every file below a directory (path, mtime, BLAKE3 digest), \
                  stores the snapshot, and reports added, removed and changed files on rescan"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file to use instead of ~/.config/dirsnap/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory and store its snapshot
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Write the snapshot here instead of the store
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Rescan a directory and report changes since its last snapshot
    Rescan {
        /// Directory to rescan (default: current directory, or the root of --from)
        dir: Option<PathBuf>,

        /// Start from this snapshot file instead of the latest stored one
        #[arg(long, value_name = "SNAPSHOT")]
        from: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Do not store the refreshed snapshot
        #[arg(long)]
        no_save: bool,
    },

    /// Compare two stored snapshots
    Diff {
        /// Older snapshot file
        old: PathBuf,

        /// Newer snapshot file
        new: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details about a snapshot file
    Show {
        /// Snapshot file
        snapshot: PathBuf,

        /// List every fingerprint
        #[arg(short, long)]
        entries: bool,
    },

    /// List stored snapshots, newest first
    List,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
