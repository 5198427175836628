//! Diffing snapshots and rendering the result for a terminal.

use std::io::Write;

use difference::{Changeset, Difference};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Role of a diff line, used to pick its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Addition,
    Removal,
    Header,
}

/// Line diff of `old` against `new` in a unified-diff style.
///
/// Returns `None` when the two are byte-for-byte equal. Otherwise the output
/// starts with `--- <old_label>` / `+++ <new_label>` and a single hunk header,
/// followed by every line prefixed with `"  "`, `"- "` or `"+ "`.
///
/// Invalid UTF-8 is decoded lossily. If that erases the difference, both
/// sides are shown with non-printable bytes escaped instead.
pub fn diff(old_label: &str, old: &[u8], new_label: &str, new: &[u8]) -> Option<String> {
    if old == new {
        return None;
    }

    let (mut old_text, mut new_text) = (
        String::from_utf8_lossy(old).into_owned(),
        String::from_utf8_lossy(new).into_owned(),
    );
    if old_text == new_text {
        old_text = escape_lines(old);
        new_text = escape_lines(new);
    }
    let changeset = Changeset::new(&old_text, &new_text, "\n");

    let mut out = format!(
        "--- {old_label}\n+++ {new_label}\n@@ -1,{} +1,{} @@\n",
        old_text.lines().count(),
        new_text.lines().count()
    );
    for change in &changeset.diffs {
        let (prefix, chunk) = match change {
            Difference::Same(chunk) => ("  ", chunk),
            Difference::Rem(chunk) => ("- ", chunk),
            Difference::Add(chunk) => ("+ ", chunk),
        };
        for line in chunk.split('\n') {
            out.push_str(prefix);
            out.push_str(line);
            out.push('\n');
        }
    }
    Some(out)
}

fn escape_lines(bytes: &[u8]) -> String {
    bytes
        .split(|&b| b == b'\n')
        .map(|line| line.escape_ascii().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Colours each line of a unified diff by its role.
///
/// With `color` false the diff is returned unchanged.
pub fn render(diff: &str, color: bool) -> String {
    if !color {
        return diff.to_string();
    }

    diff.split('\n')
        .map(|line| match classify(line) {
            Some(role) => colorize(line, role),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn classify(line: &str) -> Option<Role> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("---") || trimmed.starts_with("- ") {
        Some(Role::Removal)
    } else if trimmed.starts_with("+++") || trimmed.starts_with("+ ") {
        Some(Role::Addition)
    } else if trimmed.starts_with("@@") {
        Some(Role::Header)
    } else {
        None
    }
}

/// Wraps `text` in the ANSI escapes for `role`.
pub fn colorize(text: &str, role: Role) -> String {
    let mut spec = ColorSpec::new();
    match role {
        Role::Removal => spec.set_fg(Some(Color::Red)),
        Role::Addition => spec.set_fg(Some(Color::Green)),
        Role::Header => spec.set_fg(Some(Color::Cyan)).set_bold(true),
    };

    let mut buffer = Buffer::ansi();
    // Writes into an in-memory buffer cannot fail.
    let _ = buffer.set_color(&spec);
    let _ = buffer.write_all(text.as_bytes());
    let _ = buffer.reset();
    String::from_utf8_lossy(buffer.as_slice()).into_owned()
}
