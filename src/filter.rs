//! Normalisation filters applied to snapshot bytes.
//!
//! A [`Filter`] pairs a compiled regex with a replacement template. Filters run
//! in registration order over the freshly formatted bytes, before those bytes
//! are either compared or persisted, so stored artifacts are always filtered.
//! Replacement templates may reference capture groups (`$1`, `${name}`).

use regex::bytes::Regex;

use crate::error::{Result, SnapshotError};

/// Matches a v4-style UUID in any case.
pub const UUID_PATTERN: &str =
    "(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";

/// Matches a macOS per-user temporary file path.
pub const MACOS_TEMP_PATTERN: &str = r"/var/folders/\S+?/T/\S+";

/// Matches a single Windows path separator, capturing the following character.
pub const WINDOWS_SEPARATOR_PATTERN: &str = r"\\([\w\d]|\.)";

/// A single pattern/replacement rule.
#[derive(Debug, Clone)]
pub struct Filter {
    pattern: Regex,
    replacement: String,
}

impl Filter {
    /// Compiles `pattern`, failing with [`SnapshotError::InvalidFilter`] if it is not a valid regex.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|source| SnapshotError::InvalidFilter {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replaces every match of the pattern in `content`.
    pub fn apply(&self, content: &[u8]) -> Vec<u8> {
        self.pattern
            .replace_all(content, self.replacement.as_bytes())
            .into_owned()
    }
}

/// Runs every filter over `content`, each one seeing the output of the previous.
pub fn apply_all(content: Vec<u8>, filters: &[Filter]) -> Vec<u8> {
    filters
        .iter()
        .fold(content, |content, filter| filter.apply(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &str, filters: &[Filter]) -> String {
        String::from_utf8(apply_all(value.as_bytes().to_vec(), filters)).unwrap()
    }

    #[test]
    fn test_uuid_filter() {
        let filters = [Filter::new(UUID_PATTERN, "[UUID]").unwrap()];
        let got = run(
            r#"{"id": "c2160f4a-9bf4-400a-829f-d42c060ebbb8", "name": "John"}"#,
            &filters,
        );
        assert_eq!(got, r#"{"id": "[UUID]", "name": "John"}"#);
    }

    #[test]
    fn test_windows_path_uses_capture_group() {
        let filters = [Filter::new(WINDOWS_SEPARATOR_PATTERN, "/$1").unwrap()];
        assert_eq!(run(r"some\windows\path.txt", &filters), "some/windows/path.txt");
    }

    #[test]
    fn test_macos_temp_filter() {
        let filters = [Filter::new(MACOS_TEMP_PATTERN, "[TEMP_FILE]").unwrap()];
        assert_eq!(
            run(
                "/var/folders/y_/1g9jx9bd5fg9_5134n1dtq1c0000gn/T/tmp.Y2CkGLik3Q",
                &filters
            ),
            "[TEMP_FILE]"
        );
    }

    #[test]
    fn test_filters_apply_in_registration_order() {
        let filters = [
            Filter::new("apple", "banana").unwrap(),
            Filter::new("banana", "cherry").unwrap(),
        ];
        assert_eq!(run("apple banana", &filters), "cherry cherry");

        let reversed = [
            Filter::new("banana", "cherry").unwrap(),
            Filter::new("apple", "banana").unwrap(),
        ];
        assert_eq!(run("apple banana", &reversed), "banana cherry");
    }

    #[test]
    fn test_pipeline_is_idempotent_on_filtered_output() {
        let filters = [
            Filter::new(UUID_PATTERN, "[UUID]").unwrap(),
            Filter::new(r"\d{4}-\d{2}-\d{2}", "[DATE]").unwrap(),
        ];
        let once = apply_all(
            b"id=C2160F4A-9BF4-400A-829F-D42C060EBBB8 at 2024-01-31".to_vec(),
            &filters,
        );
        let twice = apply_all(once.clone(), &filters);
        assert_eq!(once, twice);
        assert_eq!(once, b"id=[UUID] at [DATE]");
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let err = Filter::new("(unclosed", "x").unwrap_err();
        assert_eq!(err.error_type(), crate::error::ErrorType::Configuration);
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_no_filters_is_passthrough() {
        assert_eq!(run("unchanged", &[]), "unchanged");
    }
}
