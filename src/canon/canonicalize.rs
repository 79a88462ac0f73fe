//! Filesystem-level canonicalization.
//!
//! Everything here goes through the OS's own resolution rather than
//! string rewriting, because aliasing arises precisely from OS-level
//! leniency that string normalization cannot reveal. Supports:
//! - Full canonicalization of existing paths
//! - Longest-existing-ancestor canonicalization for nonexistent paths
//! - Bounded symlink following with loop detection

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

fn map_canonicalize_error(err: std::io::Error, path: &Path) -> Error {
    match err.kind() {
        ErrorKind::NotFound => Error::UnresolvableInput {
            path: path.to_path_buf(),
            reason: "path does not exist".to_string(),
        },
        ErrorKind::PermissionDenied => Error::UnresolvableInput {
            path: path.to_path_buf(),
            reason: "permission denied while resolving".to_string(),
        },
        _ => Error::Io(err),
    }
}

/// Canonicalize an existing path by following symlinks.
///
/// Thin wrapper over the OS resolution primitive with this crate's
/// error taxonomy.
///
/// # Errors
///
/// Returns [`Error::UnresolvableInput`] if the path does not exist or
/// cannot be read, and [`Error::Io`] for other I/O failures.
///
/// # Examples
///
/// ```no_run
/// use fsalias::canon::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| map_canonicalize_error(e, path))
}

/// Canonicalize a path with explicit symlink loop detection.
///
/// Follows a leading symlink chain by hand so that loops and excessive
/// depth are reported as such instead of surfacing as an opaque I/O
/// error, then defers to the OS for the rest of the resolution.
///
/// # Errors
///
/// Returns [`Error::SymlinkLoop`] when the chain revisits a path,
/// [`Error::UnresolvableInput`] when the depth budget is exhausted,
/// and the [`canonicalize`] errors otherwise.
///
/// # Examples
///
/// ```no_run
/// use fsalias::canon::canonicalize::canonicalize_safe;
/// use std::path::Path;
///
/// let canonical = canonicalize_safe(Path::new("/tmp"), 40).unwrap();
/// ```
pub fn canonicalize_safe(path: &Path, max_depth: usize) -> Result<PathBuf> {
    let mut visited = HashSet::new();
    let mut current = path.to_path_buf();
    let mut depth = 0;

    loop {
        if !visited.insert(current.clone()) {
            return Err(Error::SymlinkLoop {
                path: current.clone(),
            });
        }

        if depth >= max_depth {
            return Err(Error::UnresolvableInput {
                path: path.to_path_buf(),
                reason: format!("too many symlinks (max {max_depth})"),
            });
        }

        match fs::read_link(&current) {
            Ok(target) => {
                current = if target.is_absolute() {
                    target
                } else {
                    // Relative symlink resolves against its parent
                    current
                        .parent()
                        .ok_or_else(|| Error::UnresolvableInput {
                            path: current.clone(),
                            reason: "symlink has no parent directory".to_string(),
                        })?
                        .join(target)
                };
                depth += 1;
            }
            Err(e) if e.kind() == ErrorKind::InvalidInput => {
                // Not a symlink; let the OS resolve any interior links
                return fs::canonicalize(&current)
                    .map_err(|e| map_canonicalize_error(e, &current));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Path doesn't exist; hand back what the chain reached
                return Ok(current);
            }
            Err(e) => {
                return Err(Error::Io(e));
            }
        }
    }
}

/// Canonicalize the existing portion of a path.
///
/// For nonexistent paths, finds the longest existing ancestor,
/// canonicalizes it, and reports the nonexistent remainder separately.
/// This is what lets an alias check run on a resource that does not
/// exist yet: the ancestors still resolve.
///
/// # Returns
///
/// A tuple of the canonicalized existing portion and the remaining
/// nonexistent components (if any).
///
/// # Errors
///
/// Returns [`Error::UnresolvableInput`] if no existing ancestor can be
/// found or the existing portion cannot be canonicalized.
///
/// # Examples
///
/// ```no_run
/// use fsalias::canon::canonicalize::canonicalize_existing;
/// use std::path::{Path, PathBuf};
///
/// // Where /tmp exists but /tmp/missing/file does not:
/// let (canonical, remainder) =
///     canonicalize_existing(Path::new("/tmp/missing/file")).unwrap();
/// assert_eq!(remainder, Some(PathBuf::from("missing/file")));
/// ```
pub fn canonicalize_existing(path: &Path) -> Result<(PathBuf, Option<PathBuf>)> {
    if let Ok(canonical) = canonicalize(path) {
        return Ok((canonical, None));
    }

    let mut current = path.to_path_buf();
    let mut non_existent = Vec::new();

    loop {
        if current.exists() {
            let canonical = canonicalize(&current)?;

            let remainder = if non_existent.is_empty() {
                None
            } else {
                non_existent.reverse();
                Some(non_existent.into_iter().collect())
            };

            return Ok((canonical, remainder));
        }

        match current.file_name() {
            Some(name) => {
                non_existent.push(name.to_os_string());
                current.pop();
            }
            None => {
                return Err(Error::UnresolvableInput {
                    path: path.to_path_buf(),
                    reason: "no existing portion of the path can be resolved".to_string(),
                });
            }
        }
    }
}
