//! Path canonicalization: every surface form down to one canonical
//! on-disk representation.
//!
//! # Key Concepts
//!
//! ## Literal form
//!
//! The literal form of a request is lexically absolute — tilde
//! expanded, resolved against the scoped base or current directory,
//! `.`/`..` collapsed — but otherwise untouched: symlinks unfollowed,
//! name bytes exactly as requested. This is the form the identity
//! probe inspects, because it still carries the evidence (case, NUL
//! bytes) that canonicalization erases.
//!
//! ## Canonical form
//!
//! The canonical form is what the operating system itself resolves the
//! request to: NUL artifacts truncated the way a lenient filesystem
//! truncates them, symlinks followed (bounded, loop-checked), and for
//! nonexistent targets the longest existing ancestor resolved with the
//! remainder appended. Two different surface forms addressing the same
//! file produce byte-identical canonical forms.
//!
//! # Examples
//!
//! ```no_run
//! use fsalias::canon::Canonicalizer;
//! use fsalias::ResourceInput;
//!
//! let canonicalizer = Canonicalizer::new();
//! let input = ResourceInput::parse("file:///var/www/../www/index.html").unwrap();
//! let canonical = canonicalizer.canonicalize(&input).unwrap();
//! assert!(canonical.as_path().is_absolute());
//! ```

pub mod canonicalize;
pub mod normalize;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::input::ResourceInput;
use crate::probe::artifacts;

pub use types::CanonicalPath;

/// Resolves requested forms to their canonical on-disk representation.
///
/// Stateless apart from its settings: no caching across calls, so the
/// same input observed twice reports the filesystem as it is at each
/// call.
///
/// # Examples
///
/// ```
/// use fsalias::canon::Canonicalizer;
///
/// let canonicalizer = Canonicalizer::new().with_max_symlink_depth(100);
/// ```
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    /// Maximum symlink chain length followed during resolution.
    max_symlink_depth: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self {
            max_symlink_depth: 40,
        }
    }
}

impl Canonicalizer {
    /// Create a canonicalizer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the maximum symlink depth.
    ///
    /// Limits how many symlinks are followed during canonicalization
    /// before resolution fails.
    #[must_use]
    pub fn with_max_symlink_depth(mut self, depth: usize) -> Self {
        self.max_symlink_depth = depth;
        self
    }

    /// The configured maximum symlink depth.
    #[must_use]
    pub fn max_symlink_depth(&self) -> usize {
        self.max_symlink_depth
    }

    /// Resolve a requested form to its canonical on-disk path.
    ///
    /// All four surface forms addressing the same file resolve to
    /// byte-identical [`CanonicalPath`] values.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if a URL form cannot be converted
    ///   to a local path
    /// - [`Error::UnresolvableInput`] if OS resolution cannot produce
    ///   an absolute path
    /// - [`Error::SymlinkLoop`] if resolution revisits a link
    ///
    /// [`Error::MalformedInput`]: crate::Error::MalformedInput
    /// [`Error::UnresolvableInput`]: crate::Error::UnresolvableInput
    /// [`Error::SymlinkLoop`]: crate::Error::SymlinkLoop
    pub fn canonicalize(&self, input: &ResourceInput) -> Result<CanonicalPath> {
        let literal = input.to_path()?;
        self.canonicalize_path(&literal)
    }

    /// Resolve a path to its canonical form.
    ///
    /// See [`Canonicalizer::canonicalize`]; this is the path-typed
    /// entry used once a surface form has been converted.
    ///
    /// # Errors
    ///
    /// As for [`Canonicalizer::canonicalize`].
    pub fn canonicalize_path(&self, path: &Path) -> Result<CanonicalPath> {
        // Truncate at an embedded NUL first: that is the name the OS
        // would actually open, and therefore the name to resolve.
        let opened = artifacts::literal_open_form(path);
        let normalized = normalize::normalize(&opened)?;

        let chased = canonicalize::canonicalize_safe(&normalized, self.max_symlink_depth)?;
        let (resolved, remainder) = canonicalize::canonicalize_existing(&chased)?;

        let full = match remainder {
            None => resolved,
            Some(rest) => resolved.join(rest),
        };

        log::debug!(
            "canonicalized {} -> {}",
            path.display(),
            full.display()
        );

        CanonicalPath::new(full)
    }

    /// The literal form of a request: lexically absolute, evidence
    /// preserved.
    ///
    /// This is what the identity probe walks; it must not be confused
    /// with the canonical form, which has had the evidence resolved
    /// away.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] for unconvertible URL forms
    /// and [`Error::UnresolvableInput`] if the path cannot be made
    /// absolute.
    ///
    /// [`Error::MalformedInput`]: crate::Error::MalformedInput
    /// [`Error::UnresolvableInput`]: crate::Error::UnresolvableInput
    pub fn literal(&self, input: &ResourceInput) -> Result<PathBuf> {
        let path = input.to_path()?;
        normalize::normalize(&path)
    }
}
