//! Snapshot formatters.
//!
//! A [`Formatter`] turns a [`Snap`] value into the bytes that are stored on
//! disk and compared on later runs, and names the file extension those bytes
//! are stored under.
//!
//! - [`TextFormatter`] is the default: it resolves the value's highest
//!   priority capability into plain text (`.snap.txt`).
//! - [`InstaFormatter`] writes an insta-compatible YAML file (`.snap`) with a
//!   metadata header document followed by the value document.

use crate::error::Result;
use crate::value::Snap;

pub mod insta;
pub mod text;

pub use insta::InstaFormatter;
pub use text::{resolve, Strategy, TextFormatter};

/// Information about the call site a snapshot was taken from.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatContext<'a> {
    /// Source file that took the snapshot, relative to the crate root.
    pub source: &'a str,
    /// Free-text description configured on the runner.
    pub description: &'a str,
    /// Source text of the snapshotted expression, when captured by [`snap!`](crate::snap).
    pub expression: Option<&'a str>,
}

/// Serialisation strategy for snapshots.
pub trait Formatter: Send + Sync {
    /// Returns the snapshot bytes for `value`.
    fn format(&self, value: &dyn Snap, ctx: &FormatContext<'_>) -> Result<Vec<u8>>;

    /// File extension, including the leading dot.
    fn ext(&self) -> &str;
}
