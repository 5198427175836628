//! Shared helpers for snapcheck integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use snapcheck::{Options, Reporter, Runner};
use tempfile::TempDir;

/// A reporter that records what a test would have done instead of panicking.
#[derive(Debug, Default)]
pub struct Recorder {
    name: String,
    failed: Cell<bool>,
    out: RefCell<String>,
}

impl Recorder {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            ..Self::default()
        })
    }

    pub fn failed(&self) -> bool {
        self.failed.get()
    }

    pub fn output(&self) -> String {
        self.out.borrow().clone()
    }
}

impl Reporter for Recorder {
    fn identity(&self) -> String {
        self.name.clone()
    }

    fn log(&self, message: &str) {
        self.out.borrow_mut().push_str(message);
    }

    fn fail(&self, message: &str) {
        self.failed.set(true);
        self.out.borrow_mut().push_str(message);
    }
}

/// A snapshot root that is removed when the test ends.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Options rooted in this sandbox with colour off.
    pub fn options(&self) -> Options {
        Options::new().root(self.dir.path()).color(false)
    }

    pub fn runner(&self, recorder: &Arc<Recorder>) -> Runner {
        self.options()
            .build(recorder.clone())
            .expect("valid options")
    }

    pub fn read(&self, runner: &Runner) -> String {
        std::fs::read_to_string(runner.path()).expect("read snapshot")
    }
}
