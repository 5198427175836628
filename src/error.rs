//! Snapcheck error handling.
//!
//! Every failure the snapshot lifecycle can produce is a variant of
//! [`SnapshotError`]. Variants carry the offending path or type name plus the
//! underlying cause, and each has a stable `miette` diagnostic code so that
//! callers (and the `snapctl` binary) can render them uniformly.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Boxed cause returned by user-implemented capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SnapshotError> = std::result::Result<T, E>;

/// Coarse classification of a [`SnapshotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Bad session configuration, raised before any test body runs.
    Configuration,
    /// A value could not be turned into snapshot bytes.
    Serialization,
    /// Stat, read, write or clean failure on the snapshot store.
    Storage,
    /// Stored and fresh snapshot differ.
    Mismatch,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Configuration => "Configuration",
            ErrorType::Serialization => "Serialization",
            ErrorType::Storage => "Storage",
            ErrorType::Mismatch => "Mismatch",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SnapshotError {
    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------
    #[error("invalid filter pattern {pattern:?}")]
    #[diagnostic(
        code(snapshot::config::filter),
        help("filter patterns use the `regex` crate syntax")
    )]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------
    #[error("custom snapshot of {type_name} failed")]
    #[diagnostic(code(snapshot::serialize::custom))]
    CustomSerialization {
        type_name: String,
        #[source]
        source: BoxError,
    },

    #[error("structured marshal of {type_name} failed")]
    #[diagnostic(code(snapshot::serialize::structured))]
    StructuredMarshal {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("text marshal of {type_name} failed")]
    #[diagnostic(code(snapshot::serialize::text))]
    TextMarshal {
        type_name: String,
        #[source]
        source: BoxError,
    },

    #[error("could not encode snapshot {what} as yaml")]
    #[diagnostic(code(snapshot::serialize::metadata))]
    Metadata {
        what: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    // ------------------------------------------------------------------
    // Storage
    // ------------------------------------------------------------------
    #[error("could not determine existence of {}", .path.display())]
    #[diagnostic(code(snapshot::store::stat))]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exists but is a directory, not a file", .path.display())]
    #[diagnostic(
        code(snapshot::store::not_a_file),
        help("remove the directory or rename the test")
    )]
    NotAFile { path: PathBuf },

    #[error("could not read previous snapshot {}", .path.display())]
    #[diagnostic(code(snapshot::store::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write snapshot {}", .path.display())]
    #[diagnostic(code(snapshot::store::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {}", .path.display())]
    #[diagnostic(code(snapshot::store::clean))]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------
    #[error("\nMismatch\n--------\n{diff}\n")]
    #[diagnostic(
        code(snapshot::mismatch),
        help("re-run with SNAPSHOT_UPDATE=1 if the new output is expected")
    )]
    Mismatch { path: PathBuf, diff: String },
}

impl SnapshotError {
    /// The family this error belongs to.
    pub fn error_type(&self) -> ErrorType {
        match self {
            SnapshotError::InvalidFilter { .. } => ErrorType::Configuration,
            SnapshotError::CustomSerialization { .. }
            | SnapshotError::StructuredMarshal { .. }
            | SnapshotError::TextMarshal { .. }
            | SnapshotError::Metadata { .. } => ErrorType::Serialization,
            SnapshotError::Stat { .. }
            | SnapshotError::NotAFile { .. }
            | SnapshotError::Read { .. }
            | SnapshotError::Write { .. }
            | SnapshotError::Clean { .. } => ErrorType::Storage,
            SnapshotError::Mismatch { .. } => ErrorType::Mismatch,
        }
    }

    /// Renders the error together with its chain of causes on one line each.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            out.push_str(": ");
            out.push_str(&err.to_string());
            cause = err.source();
        }
        out
    }
}
