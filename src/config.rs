//! Runner configuration.
//!
//! [`Options`] is a builder with one method per setting; [`Options::build`]
//! validates it and produces a [`Runner`] bound to a test.
//!
//! | Setting       | Default                   | Environment      |
//! |---------------|---------------------------|------------------|
//! | `update`      | `false`                   | `SNAPSHOT_UPDATE`|
//! | `clean`       | `false`                   | `SNAPSHOT_CLEAN` |
//! | `color`       | stderr is a terminal      | `NO_COLOR`       |
//! | `description` | empty                     |                  |
//! | `filter`      | none                      |                  |
//! | `formatter`   | [`TextFormatter`]         |                  |
//! | `root`        | `testdata/snapshots`      |                  |
//! | `clean_scope` | [`CleanScope::Identity`]  |                  |
//!
//! Environment values are read only by [`Options::from_env`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::filter::Filter;
use crate::format::{Formatter, TextFormatter};
use crate::path::DEFAULT_ROOT;
use crate::reporter::Reporter;
use crate::runner::Runner;

pub const UPDATE_ENV: &str = "SNAPSHOT_UPDATE";
pub const CLEAN_ENV: &str = "SNAPSHOT_CLEAN";
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// What a clean run removes before snapshotting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanScope {
    /// The test's own artifact plus the artifacts of its subtests.
    #[default]
    Identity,
    /// The whole snapshot root, for every test.
    Root,
}

/// Builder for a [`Runner`].
#[derive(Clone)]
pub struct Options {
    update: bool,
    clean: bool,
    color: Option<bool>,
    description: String,
    filters: Vec<(String, String)>,
    formatter: Option<Arc<dyn Formatter>>,
    root: PathBuf,
    clean_scope: CleanScope,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            update: false,
            clean: false,
            color: None,
            description: String::new(),
            filters: Vec::new(),
            formatter: None,
            root: PathBuf::from(DEFAULT_ROOT),
            clean_scope: CleanScope::Identity,
        }
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("update", &self.update)
            .field("clean", &self.clean)
            .field("color", &self.color)
            .field("description", &self.description)
            .field("filters", &self.filters)
            .field("formatter", &self.formatter.as_ref().map(|f| f.ext().to_string()))
            .field("root", &self.root)
            .field("clean_scope", &self.clean_scope)
            .finish()
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SNAPSHOT_UPDATE`, `SNAPSHOT_CLEAN` and `NO_COLOR`.
    pub fn from_env() -> Self {
        Self::new().with_env(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(UPDATE_ENV) {
            self.update = is_truthy(&value);
        }
        if let Some(value) = lookup(CLEAN_ENV) {
            self.clean = is_truthy(&value);
        }
        if lookup(NO_COLOR_ENV).is_some_and(|value| !value.is_empty()) {
            self.color = Some(false);
        }
        self
    }

    /// Overwrite stored snapshots instead of comparing against them.
    pub fn update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Delete prior snapshots for this test before running.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Force colour on or off in mismatch diffs.
    pub fn color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    /// Description embedded by formatters that write metadata.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Registers a normalisation filter; filters run in registration order.
    ///
    /// The pattern is compiled by [`Options::build`].
    pub fn filter(mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.filters.push((pattern.into(), replacement.into()));
        self
    }

    /// Replaces the default [`TextFormatter`].
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Directory snapshots are stored under.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn clean_scope(mut self, scope: CleanScope) -> Self {
        self.clean_scope = scope;
        self
    }

    /// Validates the options and binds them to the test behind `reporter`.
    ///
    /// Fails with [`SnapshotError::InvalidFilter`](crate::SnapshotError::InvalidFilter)
    /// if any filter pattern does not compile.
    pub fn build(self, reporter: impl Reporter + 'static) -> Result<Runner> {
        let filters = self
            .filters
            .iter()
            .map(|(pattern, replacement)| Filter::new(pattern, replacement.as_str()))
            .collect::<Result<Vec<_>>>()?;

        let settings = Settings {
            update: self.update,
            clean: self.clean,
            color: self.color.unwrap_or_else(color_by_default),
            description: self.description,
            filters,
            formatter: self
                .formatter
                .unwrap_or_else(|| Arc::new(TextFormatter::new())),
            root: self.root,
            clean_scope: self.clean_scope,
        };
        Ok(Runner::new(Arc::new(reporter), settings))
    }
}

/// Validated configuration held by a [`Runner`].
#[derive(Clone)]
pub(crate) struct Settings {
    pub update: bool,
    pub clean: bool,
    pub color: bool,
    pub description: String,
    pub filters: Vec<Filter>,
    pub formatter: Arc<dyn Formatter>,
    pub root: PathBuf,
    pub clean_scope: CleanScope,
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Colour is on when `NO_COLOR` is unset and stderr is a terminal.
pub fn color_by_default() -> bool {
    let no_color = std::env::var_os(NO_COLOR_ENV).is_some_and(|value| !value.is_empty());
    !no_color && atty::is(atty::Stream::Stderr)
}
