//! The host test framework, as seen by a snapshot runner.

use std::sync::Arc;

/// Reporting primitives a runner needs from the test it runs inside.
pub trait Reporter {
    /// Stable, unique name of the running test; `/` separates subtests.
    fn identity(&self) -> String;

    /// Records an informational message against the test.
    fn log(&self, message: &str);

    /// Fails the test with `message`.
    fn fail(&self, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn identity(&self) -> String {
        (**self).identity()
    }

    fn log(&self, message: &str) {
        (**self).log(message)
    }

    fn fail(&self, message: &str) {
        (**self).fail(message)
    }
}

/// Reporter for the built-in `#[test]` harness.
///
/// `fail` panics, `log` writes to the captured stderr. Without an explicit
/// name the identity comes from the harness thread name, so
/// `parser::tests::empty_input` becomes `parser/tests/empty_input`.
#[derive(Debug, Clone, Default)]
pub struct LibTest {
    name: Option<String>,
}

impl LibTest {
    /// Identity taken from the current test thread.
    pub fn current() -> Self {
        Self { name: None }
    }

    /// Explicit identity, for tests run outside the harness threads.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Converts a harness test path (`a::b::c`) to an identity (`a/b/c`).
pub fn identity_from_test_path(test_path: &str) -> String {
    test_path.replace("::", "/")
}

impl Reporter for LibTest {
    fn identity(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let thread = std::thread::current();
        identity_from_test_path(thread.name().unwrap_or("main"))
    }

    fn log(&self, message: &str) {
        eprint!("{message}");
    }

    #[track_caller]
    fn fail(&self, message: &str) {
        panic!("{message}");
    }
}
