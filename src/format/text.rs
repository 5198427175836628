//! Plain text snapshots.

use tracing::{debug, warn};

use crate::error::{Result, SnapshotError};
use crate::format::{FormatContext, Formatter};
use crate::value::Snap;

/// Which capability produced a value's snapshot bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Custom,
    Structured,
    Text,
    Display,
    Primitive,
    Fallback,
}

/// The default formatter: plain text stored under `.snap.txt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for TextFormatter {
    fn format(&self, value: &dyn Snap, _ctx: &FormatContext<'_>) -> Result<Vec<u8>> {
        resolve(value).map(|(content, _)| content)
    }

    fn ext(&self) -> &str {
        ".snap.txt"
    }
}

/// Resolves `value` to bytes using the first capability it exposes.
pub fn resolve(value: &dyn Snap) -> Result<(Vec<u8>, Strategy)> {
    let type_name = value.type_name();

    if let Some(snapper) = value.snapper() {
        debug!(type_name, "snapshot via custom snapper");
        let content = snapper
            .snap()
            .map_err(|source| SnapshotError::CustomSerialization {
                type_name: type_name.to_string(),
                source,
            })?;
        return Ok((content, Strategy::Custom));
    }

    if let Some(structured) = value.structured() {
        debug!(type_name, "snapshot via structured marshal");
        let structured_err = |source| SnapshotError::StructuredMarshal {
            type_name: type_name.to_string(),
            source,
        };
        let json = structured.map_err(structured_err)?;
        let content = serde_json::to_vec_pretty(&json).map_err(structured_err)?;
        return Ok((content, Strategy::Structured));
    }

    if let Some(text) = value.text() {
        debug!(type_name, "snapshot via text marshal");
        let content = text
            .marshal_text()
            .map_err(|source| SnapshotError::TextMarshal {
                type_name: type_name.to_string(),
                source,
            })?;
        return Ok((content, Strategy::Text));
    }

    if let Some(display) = value.display() {
        return Ok((display.to_string().into_bytes(), Strategy::Display));
    }

    if let Some(primitive) = value.primitive() {
        return Ok((primitive.into_bytes(), Strategy::Primitive));
    }

    warn!(
        type_name,
        "snapshot of {type_name} uses its Debug representation, which may change between \
         compiler or dependency versions; implement Snapper, TextMarshal or Display, \
         or wrap it in Json, for a stable snapshot"
    );
    Ok((value.fallback().into_bytes(), Strategy::Fallback))
}
