//! The snapshot runner.
//!
//! A [`Runner`] belongs to exactly one test. Each call to [`Runner::snap`] or
//! [`Runner::compare`] runs the lifecycle once, start to finish:
//!
//! 1. **Clean** (when configured): remove prior artifacts for this identity
//! 2. **Check**: does an artifact already exist at the derived path?
//! 3. **Format**: serialise the value and apply every filter
//! 4. **Decide**:
//!    - no artifact: write it, [`Outcome::Created`]
//!    - artifact and update mode: overwrite it, [`Outcome::Updated`]
//!    - artifact otherwise: diff stored against fresh, [`Outcome::Matched`]
//!      or [`Outcome::Mismatched`]
//!
//! Any error ends the run immediately; nothing is retried.

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{CleanScope, Settings};
use crate::diff;
use crate::error::{Result, SnapshotError};
use crate::filter;
use crate::format::FormatContext;
use crate::path;
use crate::reporter::Reporter;
use crate::store;
use crate::value::Snap;

/// Label of the stored side of a mismatch diff.
pub const OLD_LABEL: &str = "old";
/// Label of the fresh side of a mismatch diff.
pub const NEW_LABEL: &str = "new";

/// Result of one snapshot comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No artifact existed; the fresh snapshot was written.
    Created,
    /// Update mode overwrote the stored artifact.
    Updated,
    /// Stored and fresh snapshots are identical.
    Matched,
    /// Stored and fresh snapshots differ.
    Mismatched {
        /// Plain unified diff.
        diff: String,
        /// The diff as shown to the user, coloured if enabled.
        rendered: String,
    },
}

impl Outcome {
    pub fn passed(&self) -> bool {
        !matches!(self, Outcome::Mismatched { .. })
    }
}

/// Snapshot runner for a single test.
#[derive(Clone)]
pub struct Runner {
    reporter: Arc<dyn Reporter>,
    identity: String,
    settings: Settings,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("identity", &self.identity)
            .field("path", &self.path())
            .field("update", &self.settings.update)
            .field("clean", &self.settings.clean)
            .finish_non_exhaustive()
    }
}

impl Runner {
    pub(crate) fn new(reporter: Arc<dyn Reporter>, settings: Settings) -> Self {
        let identity = reporter.identity();
        Self {
            reporter,
            identity,
            settings,
        }
    }

    /// Identity the snapshot path is derived from.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Where this runner's snapshot is stored.
    pub fn path(&self) -> PathBuf {
        path::derive(
            &self.settings.root,
            &self.identity,
            self.settings.formatter.ext(),
        )
    }

    /// A runner for the subtest `name`, stored under this test's directory.
    pub fn subtest(&self, name: &str) -> Runner {
        let mut runner = self.clone();
        runner.identity = format!("{}/{}", self.identity, name);
        runner
    }

    /// Snapshots `value`, failing the test on mismatch or error.
    #[track_caller]
    pub fn snap<T: Snap>(&self, value: T) {
        let source = Location::caller().file();
        self.report(self.run(&value, source, None));
    }

    /// Like [`Runner::snap`], recording `expression` for formatters that
    /// write metadata. Called by [`snap!`](crate::snap).
    #[doc(hidden)]
    #[track_caller]
    pub fn snap_expression<T: Snap>(&self, value: T, expression: &str) {
        let source = Location::caller().file();
        self.report(self.run(&value, source, Some(expression)));
    }

    /// Runs the comparison and returns its outcome without reporting it.
    #[track_caller]
    pub fn compare<T: Snap>(&self, value: T) -> Result<Outcome> {
        let source = Location::caller().file();
        self.run(&value, source, None)
    }

    /// Runs the comparison, turning a mismatch into [`SnapshotError::Mismatch`].
    #[track_caller]
    pub fn check<T: Snap>(&self, value: T) -> Result<()> {
        let source = Location::caller().file();
        match self.run(&value, source, None)? {
            Outcome::Mismatched { rendered, .. } => Err(SnapshotError::Mismatch {
                path: self.path(),
                diff: rendered,
            }),
            _ => Ok(()),
        }
    }

    fn report(&self, result: Result<Outcome>) {
        match result {
            Ok(Outcome::Mismatched { rendered, .. }) => {
                let err = SnapshotError::Mismatch {
                    path: self.path(),
                    diff: rendered,
                };
                self.reporter.fail(&err.to_string());
            }
            Ok(_) => {}
            Err(err) => self.reporter.fail(&format!("Snap: {}\n", err.report())),
        }
    }

    fn run(&self, value: &dyn Snap, source: &str, expression: Option<&str>) -> Result<Outcome> {
        let settings = &self.settings;
        let path = self.path();

        if settings.clean {
            self.clean_artifacts(&path)?;
        }

        let exists = store::exists(&path)?;

        let ctx = FormatContext {
            source,
            description: &settings.description,
            expression,
        };
        let content = settings.formatter.format(value, &ctx)?;
        let content = filter::apply_all(content, &settings.filters);

        if !exists {
            store::write(&path, &content)?;
            info!(path = %path.display(), "created snapshot");
            return Ok(Outcome::Created);
        }

        if settings.update {
            store::write(&path, &content)?;
            self.reporter
                .log(&format!("Snap: updating snapshot {}\n", path.display()));
            info!(path = %path.display(), "updated snapshot");
            return Ok(Outcome::Updated);
        }

        let old = store::read(&path)?;
        match diff::diff(OLD_LABEL, &old, NEW_LABEL, &content) {
            None => {
                debug!(path = %path.display(), "snapshot matched");
                Ok(Outcome::Matched)
            }
            Some(diff) => {
                debug!(path = %path.display(), "snapshot mismatch");
                let rendered = diff::render(&diff, settings.color);
                Ok(Outcome::Mismatched { diff, rendered })
            }
        }
    }

    fn clean_artifacts(&self, artifact: &Path) -> Result<()> {
        let root = &self.settings.root;
        match self.settings.clean_scope {
            CleanScope::Identity => {
                store::clean(artifact)?;
                // An empty identity would resolve to the root itself.
                if self.identity.split('/').any(|segment| !segment.is_empty()) {
                    store::clean(&path::identity_dir(root, &self.identity))?;
                }
                Ok(())
            }
            CleanScope::Root => store::clean(root),
        }
    }
}

/// Snapshots an expression, recording its source text alongside the value.
///
/// ```rust,no_run
/// use snapcheck::{snap, LibTest, Options};
///
/// let runner = Options::from_env().build(LibTest::current()).unwrap();
/// let greeting = format!("Hello {}", "Snapshot");
/// snap!(runner, greeting);
/// ```
#[macro_export]
macro_rules! snap {
    ($runner:expr, $value:expr $(,)?) => {
        $runner.snap_expression($value, stringify!($value))
    };
}
