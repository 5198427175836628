//! The `snapctl` command-line interface.
//!
//! This module is the entry point for all CLI commands and dispatches to the
//! storage functions of the library.

use std::process;

use clap::Parser;
use miette::{IntoDiagnostic, Report};
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Command, SnapctlArgs};
use crate::path;
use crate::store;

pub mod args;
pub mod output;

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV: &str = "SNAPSHOT_LOG";

/// The main entry point for the CLI.
pub fn run() {
    init_tracing();
    let args = SnapctlArgs::parse();

    if let Err(report) = execute(args) {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs one parsed command.
pub fn execute(args: SnapctlArgs) -> Result<(), Report> {
    let root = args.root;
    match args.command {
        Command::List => {
            let paths = store::list(&root)?;
            output::print_listing(&root, &paths).into_diagnostic()
        }
        Command::Show { identity, ext } => {
            let path = path::derive(&root, &identity, &ext);
            let content = store::read(&path)?;
            output::print_snapshot(&path, &content).into_diagnostic()
        }
        Command::Clean { all: true, .. } => {
            store::clean(&root)?;
            output::print_cleaned(&root).into_diagnostic()
        }
        Command::Clean { identity, ext, .. } => {
            let identity = identity.unwrap_or_default();
            let artifact = path::derive(&root, &identity, &ext);
            if artifact.exists() {
                store::clean(&artifact)?;
                output::print_cleaned(&artifact).into_diagnostic()?;
            }
            if !identity.trim_matches('/').is_empty() {
                let dir = path::identity_dir(&root, &identity);
                if dir.is_dir() {
                    store::clean(&dir)?;
                    output::print_cleaned(&dir).into_diagnostic()?;
                }
            }
            Ok(())
        }
    }
}
