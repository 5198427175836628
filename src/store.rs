//! On-disk snapshot storage.
//!
//! Artifacts are plain files. Writes go through a temporary file in the target
//! directory that is renamed over the artifact, so a reader never observes a
//! half-written snapshot. Reads normalise `\r\n` to `\n`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SnapshotError};

/// Permissions for created directories, same as `mkdir`.
pub const DIR_MODE: u32 = 0o755;

/// Permissions for written snapshot files, same as `touch`.
pub const FILE_MODE: u32 = 0o644;

/// Reports whether a snapshot file exists at `path`.
///
/// A missing path is `Ok(false)`; a directory is [`SnapshotError::NotAFile`].
pub fn exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(SnapshotError::NotAFile {
            path: path.to_path_buf(),
        }),
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(SnapshotError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads the snapshot at `path` with line endings normalised to `\n`.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    let content = fs::read(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_line_endings(content))
}

/// Replaces every `\r\n` in `content` with `\n`.
pub fn normalize_line_endings(content: Vec<u8>) -> Vec<u8> {
    if !content.windows(2).any(|pair| pair == b"\r\n") {
        return content;
    }
    let mut out = Vec::with_capacity(content.len());
    let mut bytes = content.iter().peekable();
    while let Some(&byte) = bytes.next() {
        if byte == b'\r' && bytes.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(byte);
    }
    out
}

/// Writes `content` to `path`, creating parent directories as needed.
pub fn write(path: &Path, content: &[u8]) -> Result<()> {
    let write_err = |source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    create_dir_all(dir).map_err(write_err)?;

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(content).map_err(write_err)?;
    set_file_mode(file.as_file()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote snapshot");
    Ok(())
}

#[cfg(unix)]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(DIR_MODE).create(dir)
}

#[cfg(not(unix))]
fn create_dir_all(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn set_file_mode(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(FILE_MODE))
}

#[cfg(not(unix))]
fn set_file_mode(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

/// Removes `path`, whether a file or a directory tree. Missing paths are fine.
pub fn clean(path: &Path) -> Result<()> {
    let removed = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };
    match removed {
        Ok(()) => {
            debug!(path = %path.display(), "cleaned snapshots");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SnapshotError::Clean {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Lists every stored snapshot under `root`, sorted by path.
pub fn list(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| SnapshotError::Stat {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: e.into(),
        })?;
        if entry.file_type().is_file() {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use tempfile::TempDir;

    #[test]
    fn test_exists_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(!exists(&dir.path().join("nope.snap.txt")).unwrap());
    }

    #[test]
    fn test_exists_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let err = exists(dir.path()).unwrap_err();
        assert!(matches!(err, SnapshotError::NotAFile { .. }));
        assert_eq!(err.error_type(), ErrorType::Storage);
    }

    #[test]
    fn test_write_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Test").join("sub.snap.txt");

        write(&path, b"first").unwrap();
        assert!(exists(&path).unwrap());
        assert_eq!(read(&path).unwrap(), b"first");

        write(&path, b"second").unwrap();
        assert_eq!(read(&path).unwrap(), b"second");

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("sub.snap.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_sets_file_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mode.snap.txt");
        write(&path, b"x").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, FILE_MODE);
    }

    /// A path whose parent is a regular file fails with `ENOTDIR`.
    fn under_a_file(dir: &TempDir) -> PathBuf {
        let file = dir.path().join("plain");
        fs::write(&file, b"not a directory").unwrap();
        file.join("child.snap.txt")
    }

    #[test]
    fn test_exists_stat_error() {
        let dir = TempDir::new().unwrap();
        let path = under_a_file(&dir);
        let err = exists(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Stat { .. }));
        assert_eq!(err.error_type(), ErrorType::Storage);
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_write_error() {
        let dir = TempDir::new().unwrap();
        let path = under_a_file(&dir);
        let err = write(&path, b"x").unwrap_err();
        assert!(matches!(err, SnapshotError::Write { .. }));
        assert_eq!(err.error_type(), ErrorType::Storage);
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_clean_error() {
        let dir = TempDir::new().unwrap();
        let path = under_a_file(&dir);
        let err = clean(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Clean { .. }));
        assert_eq!(err.error_type(), ErrorType::Storage);
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_read_normalizes_crlf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crlf.snap.txt");
        fs::write(&path, b"one\r\ntwo\r\nthree\rfour").unwrap();
        assert_eq!(read(&path).unwrap(), b"one\ntwo\nthree\rfour");
    }

    #[test]
    fn test_read_missing_is_error() {
        let dir = TempDir::new().unwrap();
        let err = read(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("Test");
        write(&target.join("a.snap.txt"), b"a").unwrap();
        write(&target.join("nested").join("b.snap.txt"), b"b").unwrap();

        clean(&target).unwrap();
        assert!(!target.exists());
        clean(&target).unwrap();
    }

    #[test]
    fn test_clean_single_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("keep").join("gone.snap.txt");
        let sibling = dir.path().join("keep").join("kept.snap.txt");
        write(&file, b"x").unwrap();
        write(&sibling, b"y").unwrap();

        clean(&file).unwrap();
        assert!(!file.exists());
        assert!(sibling.exists());
    }

    #[test]
    fn test_list_is_sorted_and_files_only() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("b.snap.txt"), b"b").unwrap();
        write(&dir.path().join("a").join("z.snap.txt"), b"z").unwrap();

        let listed = list(dir.path()).unwrap();
        assert_eq!(
            listed,
            vec![
                dir.path().join("a").join("z.snap.txt"),
                dir.path().join("b.snap.txt"),
            ]
        );
        assert!(list(&dir.path().join("absent")).unwrap().is_empty());
    }
}
