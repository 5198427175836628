//! Snapshots in the `.snap` format popularised by the `insta` crate.
//!
//! The file is two YAML documents: a metadata header (source file,
//! description, expression) and then the value itself.
//!
//! ```yaml
//! ---
//! source: tests/snapshot_tests.rs
//! description: A description
//! expression: person
//! ---
//! age: 34
//! name: Obi Wan Kenobi
//! ```

use serde::Serialize;

use crate::error::{Result, SnapshotError};
use crate::format::{text, FormatContext, Formatter};
use crate::value::Snap;

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expression: Option<&'a str>,
}

/// Insta-compatible formatter, stored under `.snap`.
///
/// Values whose highest-priority capability is the structured one are written
/// as native YAML. Anything else, including a structured value that also has
/// a custom [`Snapper`](crate::Snapper), is resolved to plain text first and
/// written as a YAML string.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstaFormatter;

impl InstaFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for InstaFormatter {
    fn format(&self, value: &dyn Snap, ctx: &FormatContext<'_>) -> Result<Vec<u8>> {
        let metadata = Metadata {
            source: ctx.source,
            description: ctx.description,
            expression: ctx.expression,
        };
        let header = serde_yaml::to_string(&metadata).map_err(|source| {
            SnapshotError::Metadata {
                what: "metadata",
                source,
            }
        })?;

        let structured = match value.snapper() {
            Some(_) => None,
            None => value.structured(),
        };
        let body = match structured {
            Some(structured) => {
                let json = structured.map_err(|source| SnapshotError::StructuredMarshal {
                    type_name: value.type_name().to_string(),
                    source,
                })?;
                serde_yaml::to_string(&json)
            }
            None => {
                let (content, _) = text::resolve(value)?;
                serde_yaml::to_string(&String::from_utf8_lossy(&content))
            }
        }
        .map_err(|source| SnapshotError::Metadata {
            what: "value",
            source,
        })?;

        Ok(format!("---\n{header}---\n{body}").into_bytes())
    }

    fn ext(&self) -> &str {
        ".snap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::value::{Json, Snapper};

    #[derive(Serialize)]
    struct Person {
        name: &'static str,
        age: u32,
        employed: bool,
        friends: Vec<&'static str>,
    }

    fn obi_wan() -> Person {
        Person {
            name: "Obi Wan Kenobi",
            age: 34,
            employed: true,
            friends: vec!["Yoda", "Qui Gon Jin", "Mace Windu"],
        }
    }

    fn format(value: &dyn Snap, ctx: FormatContext<'_>) -> String {
        String::from_utf8(InstaFormatter::new().format(value, &ctx).unwrap()).unwrap()
    }

    #[test]
    fn test_structured_value_keys_are_sorted() {
        let got = format(
            &Json(&obi_wan()),
            FormatContext {
                source: "src/format/insta.rs",
                description: "",
                expression: Some("person"),
            },
        );
        assert_eq!(
            got,
            "---\nsource: src/format/insta.rs\nexpression: person\n---\n\
             age: 34\nemployed: true\nfriends:\n\
             - Yoda\n- Qui Gon Jin\n- Mace Windu\nname: Obi Wan Kenobi\n"
        );
    }

    #[test]
    fn test_plain_value_with_description() {
        let got = format(
            &"a string",
            FormatContext {
                source: "src/format/insta.rs",
                description: "A description",
                expression: None,
            },
        );
        assert_eq!(
            got,
            "---\nsource: src/format/insta.rs\ndescription: A description\n---\na string\n"
        );
    }

    #[derive(Debug, Serialize)]
    struct Credentials {
        user: &'static str,
        password: &'static str,
    }

    impl Snapper for Credentials {
        fn snap(&self) -> Result<Vec<u8>, BoxError> {
            Ok(format!("user: {}\npassword: [REDACTED]", self.user).into_bytes())
        }
    }

    impl Snap for Credentials {
        fn snapper(&self) -> Option<&dyn Snapper> {
            Some(self)
        }

        fn structured(&self) -> Option<Result<serde_json::Value, serde_json::Error>> {
            Some(serde_json::to_value(self))
        }
    }

    #[test]
    fn test_snapper_wins_over_structured() {
        let got = format(
            &Credentials {
                user: "obi",
                password: "hunter2",
            },
            FormatContext {
                source: "src/format/insta.rs",
                description: "",
                expression: None,
            },
        );
        assert!(!got.contains("hunter2"), "{got}");
        assert!(got.starts_with("---\nsource: src/format/insta.rs\n---\n"));
        assert!(got.contains("password: [REDACTED]"), "{got}");
    }

    #[test]
    fn test_ext() {
        assert_eq!(InstaFormatter::new().ext(), ".snap");
    }
}
