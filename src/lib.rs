//! # Snapcheck
//!
//! File-backed snapshot testing. A test serialises a value, and the first run
//! stores it under `testdata/snapshots/<test identity><ext>`. Later runs
//! compare the fresh serialisation with the stored one and fail the test with
//! a coloured diff when they differ.
//!
//! ```rust,no_run
//! use snapcheck::{filter, Json, LibTest, Options};
//!
//! #[derive(serde::Serialize)]
//! struct User {
//!     id: String,
//!     name: String,
//! }
//!
//! let runner = Options::from_env()
//!     .filter(filter::UUID_PATTERN, "[UUID]")
//!     .build(LibTest::current())
//!     .unwrap();
//!
//! let user = User {
//!     id: "c2160f4a-9bf4-400a-829f-d42c060ebbb8".into(),
//!     name: "John".into(),
//! };
//! runner.snap(Json(&user));
//! ```
//!
//! Values choose how they are serialised through the [`Snap`] capabilities;
//! see the [`value`] module for the priority order.

pub use crate::config::{CleanScope, Options};
pub use crate::error::{BoxError, ErrorType, Result, SnapshotError};
pub use crate::filter::Filter;
pub use crate::format::{FormatContext, Formatter, InstaFormatter, TextFormatter};
pub use crate::reporter::{LibTest, Reporter};
pub use crate::runner::{Outcome, Runner};
pub use crate::value::{Bytes, Debugged, Displayed, Json, Snap, Snapper, Text, TextMarshal};

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod filter;
pub mod format;
pub mod path;
pub mod reporter;
pub mod runner;
pub mod store;
pub mod value;

/// Runner for the current `#[test]`, configured from the environment.
pub fn runner() -> Result<Runner> {
    Options::from_env().build(LibTest::current())
}
