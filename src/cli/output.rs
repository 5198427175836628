//! Handles all user-facing output for `snapctl`.
//!
//! Listings and headers are coloured when stdout is a terminal; snapshot
//! contents are always printed verbatim.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Colour only when stdout is a terminal; `Auto` alone would still colour pipes.
fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints each snapshot path relative to `root`, one per line.
pub fn print_listing(root: &Path, paths: &[PathBuf]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    for path in paths {
        let relative = path.strip_prefix(root).unwrap_or(path.as_path());
        let (dir, file) = match (relative.parent(), relative.file_name()) {
            (Some(dir), Some(file)) if !dir.as_os_str().is_empty() => {
                (format!("{}/", dir.display()), file.to_string_lossy())
            }
            _ => (String::new(), relative.as_os_str().to_string_lossy()),
        };
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, "{dir}")?;
        stdout.reset()?;
        writeln!(stdout, "{file}")?;
    }
    Ok(())
}

/// Prints a snapshot preceded by a bold header naming its path.
pub fn print_snapshot(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(stdout, "--- {} ---", path.display())?;
    stdout.reset()?;
    stdout.write_all(content)?;
    if !content.ends_with(b"\n") {
        writeln!(stdout)?;
    }
    Ok(())
}

/// Confirms a deletion.
pub fn print_cleaned(path: &Path) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stdout, "cleaned")?;
    stdout.reset()?;
    writeln!(stdout, " {}", path.display())
}
