//! Access decisions over alias verdicts.
//!
//! The alias layer reports; this module decides. A hosting container
//! consults [`AliasPolicy::decide`] before serving any path-derived
//! resource: everything that is not a confirmed non-alias is a deny,
//! with a single opt-in exemption for pure symlink redirection.
//!
//! [`ProtectedSpace`] carries the deny-list side of the same boundary:
//! a set of canonical prefixes (a `WEB-INF`-style subtree, a secrets
//! directory) that must never be served regardless of verdict. Once
//! configuration is finished the set can be sealed; mutating it again
//! requires surrendering the capability token returned by `seal`.

use std::path::Path;

use crate::alias::{AliasKind, AliasVerdict};
use crate::canon::CanonicalPath;
use crate::error::{Error, Result};

/// The outcome of a policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The resource may be served.
    Allow,
    /// The resource must not be served.
    Deny,
}

impl AccessDecision {
    /// Whether this decision permits serving.
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Fail-closed allow/deny policy over alias verdicts.
///
/// By default every verdict except a confirmed [`AliasVerdict::NotAlias`]
/// is denied. Symlink redirection can be exempted for deployments that
/// intentionally serve through links; byte-level artifacts and
/// inconclusive checks are never exempt.
///
/// # Examples
///
/// ```
/// use fsalias::{AliasPolicy, AliasVerdict};
///
/// let policy = AliasPolicy::new();
/// assert!(policy.decide(&AliasVerdict::NotAlias).is_allow());
/// assert!(!policy.decide(&AliasVerdict::Indeterminate).is_allow());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasPolicy {
    allow_symlink_aliases: bool,
}

impl AliasPolicy {
    /// Create the default policy: deny every non-confirmed verdict.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit aliases whose only mechanism is symlink traversal.
    #[must_use]
    pub fn with_symlink_aliases_allowed(mut self, allow: bool) -> Self {
        self.allow_symlink_aliases = allow;
        self
    }

    /// Decide whether a resource with this verdict may be served.
    #[must_use]
    pub fn decide(&self, verdict: &AliasVerdict) -> AccessDecision {
        match verdict {
            AliasVerdict::NotAlias => AccessDecision::Allow,
            AliasVerdict::Alias {
                kind: AliasKind::Symlink,
                ..
            } if self.allow_symlink_aliases => AccessDecision::Allow,
            AliasVerdict::Alias { .. } | AliasVerdict::Indeterminate => AccessDecision::Deny,
        }
    }
}

/// Capability token returned by [`ProtectedSpace::seal`].
///
/// Move-only: unsealing consumes the token, so only the holder of the
/// exact token handed out at seal time can reopen the space.
pub struct SealKey(u64);

impl std::fmt::Debug for SealKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token value is the capability; keep it out of logs.
        f.write_str("SealKey(..)")
    }
}

/// A set of canonical path prefixes that must never be served.
///
/// # Examples
///
/// ```
/// use fsalias::{CanonicalPath, ProtectedSpace};
/// use std::path::{Path, PathBuf};
///
/// let mut space = ProtectedSpace::new();
/// space
///     .protect(CanonicalPath::new(PathBuf::from("/srv/app/private")).unwrap())
///     .unwrap();
///
/// let key = space.seal().unwrap();
/// assert!(space.covers(Path::new("/srv/app/private/config.yaml")));
/// assert!(!space.covers(Path::new("/srv/app/public/index.html")));
///
/// // Further mutation requires the capability back
/// space.unseal(key).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ProtectedSpace {
    roots: Vec<CanonicalPath>,
    seal: Option<u64>,
}

impl ProtectedSpace {
    /// Create an empty, unsealed space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a protected prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the space is sealed.
    pub fn protect(&mut self, root: CanonicalPath) -> Result<()> {
        if self.seal.is_some() {
            return Err(Error::Validation {
                field: "protected_space".to_string(),
                message: "space is sealed; unseal before modifying".to_string(),
            });
        }
        self.roots.push(root);
        Ok(())
    }

    /// Whether a canonical path falls under any protected prefix.
    ///
    /// Callers must pass the canonical form; probing the requested
    /// form here would reopen the very bypass the alias check closes.
    #[must_use]
    pub fn covers(&self, canonical: &Path) -> bool {
        self.roots.iter().any(|root| canonical.starts_with(root))
    }

    /// Whether the space is currently sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.seal.is_some()
    }

    /// Seal the space against further mutation.
    ///
    /// Returns the capability required to unseal it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the space is already sealed.
    pub fn seal(&mut self) -> Result<SealKey> {
        if self.seal.is_some() {
            return Err(Error::Validation {
                field: "protected_space".to_string(),
                message: "space is already sealed".to_string(),
            });
        }
        let token = rand::random::<u64>();
        self.seal = Some(token);
        Ok(SealKey(token))
    }

    /// Unseal the space, surrendering the capability.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the space is not sealed or the
    /// key is not the one handed out at seal time.
    pub fn unseal(&mut self, key: SealKey) -> Result<()> {
        match self.seal {
            Some(token) if token == key.0 => {
                self.seal = None;
                Ok(())
            }
            Some(_) => Err(Error::Validation {
                field: "protected_space".to_string(),
                message: "seal key does not match".to_string(),
            }),
            None => Err(Error::Validation {
                field: "protected_space".to_string(),
                message: "space is not sealed".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::AliasKind;
    use std::path::PathBuf;

    fn canonical(path: &str) -> CanonicalPath {
        CanonicalPath::new(PathBuf::from(path)).unwrap()
    }

    fn alias_of(kind: AliasKind) -> AliasVerdict {
        AliasVerdict::Alias {
            target: canonical("/real/target"),
            kind,
        }
    }

    #[test]
    fn test_default_policy_denies_everything_but_confirmed() {
        let policy = AliasPolicy::new();
        assert!(policy.decide(&AliasVerdict::NotAlias).is_allow());
        assert!(!policy.decide(&AliasVerdict::Indeterminate).is_allow());
        assert!(!policy.decide(&alias_of(AliasKind::Symlink)).is_allow());
        assert!(!policy.decide(&alias_of(AliasKind::TrailingArtifact)).is_allow());
        assert!(!policy.decide(&alias_of(AliasKind::NameVariant)).is_allow());
    }

    #[test]
    fn test_symlink_exemption_is_narrow() {
        let policy = AliasPolicy::new().with_symlink_aliases_allowed(true);
        assert!(policy.decide(&alias_of(AliasKind::Symlink)).is_allow());
        // The exemption never extends to byte-level artifacts or
        // inconclusive checks
        assert!(!policy.decide(&alias_of(AliasKind::TrailingArtifact)).is_allow());
        assert!(!policy.decide(&alias_of(AliasKind::Resolved)).is_allow());
        assert!(!policy.decide(&AliasVerdict::Indeterminate).is_allow());
    }

    #[test]
    fn test_protected_space_covers_descendants() {
        let mut space = ProtectedSpace::new();
        space.protect(canonical("/srv/app/private")).unwrap();

        assert!(space.covers(Path::new("/srv/app/private")));
        assert!(space.covers(Path::new("/srv/app/private/deep/file")));
        assert!(!space.covers(Path::new("/srv/app/public")));
        // Prefix matching is component-wise, not textual
        assert!(!space.covers(Path::new("/srv/app/private_extra")));
    }

    #[test]
    fn test_sealed_space_rejects_mutation() {
        let mut space = ProtectedSpace::new();
        space.protect(canonical("/srv/a")).unwrap();
        let key = space.seal().unwrap();

        assert!(space.is_sealed());
        assert!(space.protect(canonical("/srv/b")).is_err());

        space.unseal(key).unwrap();
        assert!(!space.is_sealed());
        space.protect(canonical("/srv/b")).unwrap();
    }

    #[test]
    fn test_double_seal_rejected() {
        let mut space = ProtectedSpace::new();
        let _key = space.seal().unwrap();
        assert!(space.seal().is_err());
    }

    #[test]
    fn test_wrong_key_rejected() {
        let mut space = ProtectedSpace::new();
        let _key = space.seal().unwrap();

        let mut other = ProtectedSpace::new();
        let other_key = other.seal().unwrap();

        assert!(space.unseal(other_key).is_err());
        assert!(space.is_sealed());
    }

    #[test]
    fn test_unseal_unsealed_rejected() {
        let mut space = ProtectedSpace::new();
        let mut donor = ProtectedSpace::new();
        let key = donor.seal().unwrap();
        assert!(space.unseal(key).is_err());
    }

    #[test]
    fn test_seal_key_debug_is_redacted() {
        let mut space = ProtectedSpace::new();
        let key = space.seal().unwrap();
        assert_eq!(format!("{key:?}"), "SealKey(..)");
    }
}
