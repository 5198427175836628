//! Arguments for `snapctl`.
//!
//! Every subcommand works on the snapshot tree under `--root`; identities are
//! the same `/`-separated test names the library derives paths from.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::path::DEFAULT_ROOT;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "snapctl",
    version,
    about = "Inspect and maintain stored snapshot files."
)]
pub struct SnapctlArgs {
    /// Directory snapshots are stored under.
    #[arg(long, global = true, default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every stored snapshot.
    List,
    /// Print a stored snapshot.
    Show {
        /// Test identity, with `/` between subtest segments.
        #[arg(required = true)]
        identity: String,
        /// Extension the snapshot was stored with.
        #[arg(long, default_value = ".snap.txt")]
        ext: String,
    },
    /// Delete stored snapshots for a test and its subtests.
    Clean {
        /// Test identity, with `/` between subtest segments.
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        identity: Option<String>,
        /// Extension the snapshot was stored with.
        #[arg(long, default_value = ".snap.txt")]
        ext: String,
        /// Delete the entire snapshot root.
        #[arg(long)]
        all: bool,
    },
}
