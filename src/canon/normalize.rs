//! Lexical path normalization.
//!
//! Normalization makes a requested form absolute without touching the
//! filesystem: tilde expansion, resolution against the scoped base
//! directory (or the current directory), and `.`/`..` component
//! resolution. Symlinks are not followed and byte-level evidence such
//! as name case or an embedded NUL is preserved, because downstream
//! identity probing needs to see it.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::scope;

/// Expand tilde (~) to the home directory.
///
/// Handles `~` and `~/path` but not `~user` syntax. Non-UTF8 paths
/// pass through untouched; they cannot spell a tilde prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use fsalias::canon::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// // Leaves absolute paths unchanged
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        // Non-UTF8 paths cannot start with '~'; pass them through.
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::UnresolvableInput {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::MalformedInput {
            input: path_str.to_string(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components in an absolute path.
///
/// This is purely lexical: no component is stat'd and no symlink is
/// followed.
///
/// # Errors
///
/// Returns an error if the path contains enough `..` components to
/// escape the root.
///
/// # Examples
///
/// ```
/// use fsalias::canon::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => {
                result.push(c);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    return Err(Error::UnresolvableInput {
                        path: path.to_path_buf(),
                        reason: "too many '..' components (escapes root)".to_string(),
                    });
                }
            }
        }
    }

    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    Ok(result)
}

/// Normalize a requested form to an absolute path, lexically.
///
/// 1. Expands tilde (~) if present
/// 2. Resolves relative paths against the scoped base directory
///    ([`crate::scope`]) if one is active, otherwise the process
///    current directory
/// 3. Resolves `.` and `..` components
///
/// The result is the *literal* form of the request: absolute and
/// dot-free, but with symlinks unfollowed and name bytes untouched.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory
/// cannot be determined, or the path escapes the root.
///
/// # Examples
///
/// ```no_run
/// use fsalias::canon::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./src")).unwrap();
/// assert!(normalized.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let base = match scope::current_base() {
            Some(base) => base,
            None => env::current_dir().map_err(|e| Error::UnresolvableInput {
                path: path.to_path_buf(),
                reason: format!("cannot get current directory: {e}"),
            })?,
        };
        base.join(expanded)
    };

    resolve_components(&absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope;

    #[test]
    fn test_expand_tilde_home() {
        let home = home::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
    }

    #[test]
    fn test_expand_tilde_with_path() {
        let home = home::home_dir().unwrap();
        let expanded = expand_tilde(Path::new("~/test")).unwrap();
        assert_eq!(expanded, home.join("test"));
    }

    #[test]
    fn test_expand_tilde_absolute_unchanged() {
        let path = Path::new("/absolute/path");
        assert_eq!(expand_tilde(path).unwrap(), path);
    }

    #[test]
    fn test_expand_tilde_user_syntax_not_supported() {
        let result = expand_tilde(Path::new("~user/path"));
        assert!(result.unwrap_err().is_malformed());
    }

    #[test]
    fn test_resolve_components_simple() {
        let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
        assert_eq!(resolved, PathBuf::from("/a/c"));
    }

    #[test]
    fn test_resolve_components_multiple_parent() {
        let resolved = resolve_components(Path::new("/a/b/../../c")).unwrap();
        assert_eq!(resolved, PathBuf::from("/c"));
    }

    #[test]
    fn test_resolve_components_root_only() {
        let resolved = resolve_components(Path::new("/")).unwrap();
        assert_eq!(resolved, PathBuf::from("/"));
    }

    #[test]
    fn test_resolve_components_too_many_parent() {
        let result = resolve_components(Path::new("/a/../.."));
        assert!(result.unwrap_err().is_unresolvable());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_components_preserves_nul_evidence() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/dir/test.txt\0");
        let resolved = resolve_components(Path::new(raw)).unwrap();
        assert_eq!(resolved.as_os_str().as_encoded_bytes(), b"/dir/test.txt\0");
    }

    #[test]
    #[cfg(unix)]
    fn test_normalize_absolute() {
        let normalized = normalize(Path::new("/a/./b/../c")).unwrap();
        assert_eq!(normalized, PathBuf::from("/a/c"));
    }

    #[test]
    fn test_normalize_relative_uses_cwd() {
        let cwd = env::current_dir().unwrap();
        let normalized = normalize(Path::new("relative/path")).unwrap();
        assert!(normalized.is_absolute());
        assert!(normalized.starts_with(&cwd));
        assert!(normalized.ends_with("relative/path"));
    }

    #[test]
    fn test_normalize_relative_uses_scoped_base() {
        let _guard = scope::enter(Path::new("/scoped/base"));
        let normalized = normalize(Path::new("file.txt")).unwrap();
        assert_eq!(normalized, PathBuf::from("/scoped/base/file.txt"));
    }

    #[test]
    fn test_normalize_current_dir() {
        let cwd = env::current_dir().unwrap();
        let normalized = normalize(Path::new(".")).unwrap();
        assert_eq!(normalized, cwd);
    }

    // Property-based tests
    #[cfg(unix)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn path_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec("[a-zA-Z0-9_-]{1,10}", 1..=5)
                .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        fn path_with_dots_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    Just(".".to_string()),
                    Just("..".to_string()),
                    "[a-zA-Z0-9_-]{1,10}".prop_map(|s| s),
                ],
                1..=8,
            )
            .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        proptest! {
            /// Normalization always produces absolute paths
            #[test]
            fn normalize_always_absolute(s in path_strategy()) {
                let path = Path::new(&s);
                if let Ok(normalized) = normalize(path) {
                    prop_assert!(normalized.is_absolute());
                }
            }

            /// Normalization is idempotent
            #[test]
            fn normalize_idempotent(s in path_strategy()) {
                let path = Path::new(&s);
                if let Ok(norm1) = normalize(path) {
                    if let Ok(norm2) = normalize(&norm1) {
                        prop_assert_eq!(norm1, norm2);
                    }
                }
            }

            /// Normalized paths contain no `.` or `..` components
            #[test]
            fn normalize_no_dot_components(s in path_with_dots_strategy()) {
                let path = Path::new(&s);
                if let Ok(normalized) = normalize(path) {
                    for component in normalized.components() {
                        prop_assert_ne!(component, std::path::Component::CurDir);
                        prop_assert_ne!(component, std::path::Component::ParentDir);
                    }
                }
            }

            /// resolve_components preserves absoluteness
            #[test]
            fn resolve_components_preserves_absolute(s in path_strategy()) {
                let path = Path::new(&s);
                if let Ok(resolved) = resolve_components(path) {
                    prop_assert!(resolved.is_absolute());
                }
            }
        }
    }
}
