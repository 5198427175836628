//! Mapping test identities to snapshot locations.
//!
//! An identity such as `parser/handles_empty/case_3` becomes
//! `<root>/parser/handles_empty/case_3<ext>`, each `/` segment a directory.
//! Identities are not sanitised; they must already be filesystem-safe.

use std::path::{Path, PathBuf};

/// Storage root, relative to the crate under test.
pub const DEFAULT_ROOT: &str = "testdata/snapshots";

fn segments(identity: &str) -> impl Iterator<Item = &str> {
    identity.split('/').filter(|segment| !segment.is_empty())
}

/// Path of the artifact for `identity` stored with extension `ext`.
pub fn derive(root: &Path, identity: &str, ext: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    let mut parts: Vec<&str> = segments(identity).collect();
    let file = parts.pop().unwrap_or_default();
    for part in parts {
        path.push(part);
    }
    path.push(format!("{file}{ext}"));
    path
}

/// Directory holding the artifacts of any subtests nested under `identity`.
pub fn identity_dir(root: &Path, identity: &str) -> PathBuf {
    segments(identity).fold(root.to_path_buf(), |path, segment| path.join(segment))
}
