//! Alias classification.
//!
//! The checker compares the literal requested form of a resource with
//! its canonical form and classifies the result. It makes no
//! filesystem calls itself beyond what the injected
//! [`FileSystemProbe`] provides, which keeps the decision logic
//! platform-agnostic and testable against a fake probe.
//!
//! Failure never becomes a verdict: when the probe cannot answer, the
//! result is [`AliasVerdict::Indeterminate`], and security-relevant
//! callers must treat that the same as a confirmed alias.

use std::path::Path;

use crate::canon::CanonicalPath;
use crate::probe::{FileSystemProbe, OsProbe, ProbeIdentity};

/// The mechanism behind a detected alias.
///
/// Integrating policy may choose to treat symlink redirection
/// differently from byte-level aliasing; the default policy denies
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasKind {
    /// The requested name carries bytes the OS discards when opening.
    TrailingArtifact,
    /// The on-disk name differs byte-for-byte from the requested one.
    NameVariant,
    /// The requested form reaches its target through a symlink.
    Symlink,
    /// The resolved location differs for some other reason.
    Resolved,
}

/// The outcome of an alias check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasVerdict {
    /// The requested form is exactly what the filesystem serves.
    NotAlias,
    /// The requested form addresses `target` under different bytes.
    Alias {
        /// The canonical form the request actually resolves to.
        target: CanonicalPath,
        /// The mechanism behind the divergence.
        kind: AliasKind,
    },
    /// The check could not be completed; must be treated as a deny.
    Indeterminate,
}

impl AliasVerdict {
    /// Whether this is a confirmed non-alias.
    #[must_use]
    pub fn is_not_alias(&self) -> bool {
        matches!(self, Self::NotAlias)
    }

    /// Whether this is a confirmed alias.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Alias { .. })
    }

    /// Whether the check was inconclusive.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::Indeterminate)
    }

    /// The alias target, if this verdict is an alias.
    #[must_use]
    pub fn alias_target(&self) -> Option<&CanonicalPath> {
        match self {
            Self::Alias { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Compares requested and canonical forms and classifies the result.
///
/// # Examples
///
/// ```no_run
/// use fsalias::{AliasChecker, Canonicalizer, ResourceInput};
///
/// let canonicalizer = Canonicalizer::new();
/// let checker = AliasChecker::new();
///
/// let input = ResourceInput::parse("/var/www/index.html").unwrap();
/// let canonical = canonicalizer.canonicalize(&input).unwrap();
/// let literal = canonicalizer.literal(&input).unwrap();
/// let verdict = checker.check(&literal, &canonical);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AliasChecker<P = OsProbe> {
    probe: P,
}

impl AliasChecker<OsProbe> {
    /// Create a checker over the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self { probe: OsProbe::new() }
    }
}

impl<P: FileSystemProbe> AliasChecker<P> {
    /// Create a checker with a specific probe implementation.
    #[must_use]
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// A reference to the underlying probe.
    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Classify the relationship between a literal requested form and
    /// its canonical form.
    ///
    /// A requested form byte-equal to its canonical form is never an
    /// alias, with no filesystem access at all. A requested form that
    /// traverses a symlink is always an alias, however expected the
    /// symlink may be: access decisions keyed on the requested string
    /// must not trust symlink traversal. Probe failures yield
    /// [`AliasVerdict::Indeterminate`], never a default.
    #[must_use]
    pub fn check(&self, requested: &Path, canonical: &CanonicalPath) -> AliasVerdict {
        if requested.as_os_str() == canonical.as_path().as_os_str() {
            return AliasVerdict::NotAlias;
        }

        match self.probe.identity_probe(requested, canonical.as_path()) {
            Ok(ProbeIdentity::Exact) => AliasVerdict::NotAlias,
            Ok(identity) => AliasVerdict::Alias {
                target: canonical.clone(),
                kind: match identity {
                    ProbeIdentity::TrailingArtifact => AliasKind::TrailingArtifact,
                    ProbeIdentity::NameVariant => AliasKind::NameVariant,
                    ProbeIdentity::SymlinkTraversal => AliasKind::Symlink,
                    ProbeIdentity::Exact | ProbeIdentity::Diverged => AliasKind::Resolved,
                },
            },
            Err(e) => {
                log::warn!(
                    "identity probe failed for {}: {e}; reporting indeterminate",
                    requested.display()
                );
                AliasVerdict::Indeterminate
            }
        }
    }
}
