//! Common test utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates a temporary directory and returns it with its canonical
/// path.
///
/// The canonical path matters: on platforms where the temp root is
/// itself a symlink, constructing resources from the raw tempdir path
/// would legitimately report a symlink alias and drown out what a
/// test actually exercises.
pub fn canonical_tempdir() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let canonical = fs::canonicalize(dir.path()).expect("canonicalize tempdir");
    (dir, canonical)
}

/// The same path with a trailing NUL byte appended to its final name.
#[cfg(unix)]
pub fn with_trailing_nul(path: &Path) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let mut bytes = path.to_path_buf().into_os_string().into_vec();
    bytes.push(0);
    PathBuf::from(OsString::from_vec(bytes))
}
