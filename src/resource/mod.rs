//! The addressable resource facade.
//!
//! A [`Resource`] ties together the whole pipeline: it preserves the
//! requested form verbatim, resolves it to a canonical on-disk path,
//! runs the alias check, and memoizes both results. Existence is the
//! one live query — filesystem state may change, so it is re-checked
//! on every call, while the canonical form and the verdict are
//! computed exactly once at construction and never mutated.
//!
//! Because all memoization happens inside construction, a `Resource`
//! is immutable afterwards and safe to share across threads.

use std::path::{Path, PathBuf};

use url::Url;

use crate::alias::{AliasChecker, AliasVerdict};
use crate::canon::{CanonicalPath, Canonicalizer};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::ResourceInput;
use crate::probe::{FileSystemProbe, OsProbe};
use crate::scope;

/// An addressable filesystem entity with its alias verdict.
///
/// # Examples
///
/// ```no_run
/// use fsalias::Resource;
///
/// let resource = Resource::new("/var/www/index.html").unwrap();
/// if resource.alias().is_none() {
///     // confirmed non-alias: the requested string is exactly what
///     // the filesystem serves
///     assert!(resource.exists().unwrap());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Resource {
    /// The original input, verbatim.
    requested: ResourceInput,
    /// Lexically absolute requested form, evidence preserved.
    literal: PathBuf,
    /// The OS-resolved form, computed once.
    canonical: CanonicalPath,
    /// The alias verdict, computed once.
    verdict: AliasVerdict,
    /// Settings the resource was resolved under; children inherit them.
    config: Config,
}

impl Resource {
    /// Construct a resource from a requested string.
    ///
    /// Accepts a raw path, an absolute path, or a `file://` URL
    /// string; all forms produce equivalent resources for the same
    /// file.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] for unparsable strings or
    ///   non-`file` schemes
    /// - [`Error::UnresolvableInput`] / [`Error::SymlinkLoop`] when OS
    ///   resolution fails
    pub fn new(input: &str) -> Result<Self> {
        Self::resolve(ResourceInput::parse(input)?, &Config::default())
    }

    /// Construct a resource from a path.
    ///
    /// # Errors
    ///
    /// As for [`Resource::new`], minus string parsing.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::resolve(ResourceInput::Path(path.into()), &Config::default())
    }

    /// Construct a resource from a parsed URL.
    ///
    /// # Errors
    ///
    /// As for [`Resource::new`].
    pub fn from_url(url: &Url) -> Result<Self> {
        Self::resolve(ResourceInput::Url(url.clone()), &Config::default())
    }

    /// Construct a resource from any surface form under explicit
    /// settings.
    ///
    /// This is the single entry point the convenience constructors
    /// funnel into. Resolution and the alias check happen here, once;
    /// the returned value is immutable.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] for unconvertible URL forms
    /// - [`Error::UnresolvableInput`] / [`Error::SymlinkLoop`] when OS
    ///   resolution fails
    pub fn resolve(input: ResourceInput, config: &Config) -> Result<Self> {
        let canonicalizer =
            Canonicalizer::new().with_max_symlink_depth(config.max_symlink_depth);

        let resolve_forms = || -> Result<(PathBuf, CanonicalPath)> {
            let literal = canonicalizer.literal(&input)?;
            let canonical = canonicalizer.canonicalize(&input)?;
            Ok((literal, canonical))
        };

        let (literal, canonical) = match &config.base_dir {
            Some(base) => scope::with_base(base, resolve_forms)?,
            None => resolve_forms()?,
        };

        let verdict = AliasChecker::new().check(&literal, &canonical);

        Ok(Self {
            requested: input,
            literal,
            canonical,
            verdict,
            config: config.clone(),
        })
    }

    /// The original requested form, verbatim.
    #[must_use]
    pub fn requested(&self) -> &ResourceInput {
        &self.requested
    }

    /// The lexically absolute requested form, evidence preserved.
    #[must_use]
    pub fn literal(&self) -> &Path {
        &self.literal
    }

    /// The canonical on-disk form.
    #[must_use]
    pub fn canonical(&self) -> &CanonicalPath {
        &self.canonical
    }

    /// The alias verdict computed at construction.
    #[must_use]
    pub fn verdict(&self) -> &AliasVerdict {
        &self.verdict
    }

    /// The canonical form this resource aliases to, if any.
    ///
    /// Returns `None` exactly when the check confirmed a non-alias.
    /// An inconclusive check reports the canonical form here: a caller
    /// that serves only on `None` therefore serves only confirmed
    /// non-aliases, which is the fail-closed direction.
    #[must_use]
    pub fn alias(&self) -> Option<&CanonicalPath> {
        match &self.verdict {
            AliasVerdict::NotAlias => None,
            AliasVerdict::Alias { target, .. } => Some(target),
            AliasVerdict::Indeterminate => Some(&self.canonical),
        }
    }

    /// Whether the canonical form currently exists on disk.
    ///
    /// Live state, never cached: a resource deleted after construction
    /// stops existing, while its alias verdict stays as computed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProbeFailed`] when the filesystem cannot be
    /// interrogated; inconclusive, not "does not exist".
    pub fn exists(&self) -> Result<bool> {
        OsProbe::new().exists(self.canonical.as_path())
    }

    /// Whether the canonical form is currently a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProbeFailed`] for I/O failures other than
    /// nonexistence.
    pub fn is_directory(&self) -> Result<bool> {
        match std::fs::metadata(self.canonical.as_path()) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::ProbeFailed {
                path: self.canonical.as_path().to_path_buf(),
                source: e,
            }),
        }
    }

    /// Resolve a child resource beneath this one.
    ///
    /// The child's requested form is this resource's requested form
    /// joined with `segment`, re-resolved and re-checked from scratch:
    /// a child never inherits alias-freedom from its parent, and a
    /// malformed or NUL-bearing segment surfaces as an alias or an
    /// error, never silently.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if the segment is rooted or carries
    ///   a filesystem prefix
    /// - Any construction error of [`Resource::resolve`], propagated
    ///   unchanged
    pub fn add_path(&self, segment: impl AsRef<Path>) -> Result<Self> {
        let segment = segment.as_ref();
        if segment.has_root()
            || segment
                .components()
                .any(|c| matches!(c, std::path::Component::Prefix(_)))
        {
            return Err(Error::MalformedInput {
                input: segment.to_string_lossy().into_owned(),
                reason: "segment must be relative to the parent resource".to_string(),
            });
        }

        let base = self.requested.to_path()?;
        Self::resolve(ResourceInput::Path(base.join(segment)), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_non_alias_file() {
        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        let file = canonical_dir.join("test.txt");
        fs::write(&file, "x").unwrap();

        let resource = Resource::from_path(&file).unwrap();
        assert!(resource.exists().unwrap());
        assert!(resource.alias().is_none());
        assert_eq!(resource.canonical().as_path(), file);
    }

    #[test]
    fn test_nonexistent_resource_has_verdict() {
        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        let missing = canonical_dir.join("missing.txt");

        let resource = Resource::from_path(&missing).unwrap();
        assert!(!resource.exists().unwrap());
        // Nonexistence does not short-circuit the check
        assert!(resource.alias().is_none());
    }

    #[test]
    fn test_alias_memoized_across_deletion() {
        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        let file = canonical_dir.join("fleeting.txt");
        fs::write(&file, "x").unwrap();

        let resource = Resource::from_path(&file).unwrap();
        let first = resource.alias().cloned();

        fs::remove_file(&file).unwrap();

        // exists() is live; the verdict is not
        assert!(!resource.exists().unwrap());
        assert_eq!(resource.alias().cloned(), first);
    }

    #[test]
    fn test_dot_segments_resolve_before_check() {
        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir(canonical_dir.join("x")).unwrap();
        fs::write(canonical_dir.join("x").join("file.txt"), "x").unwrap();

        let composed = canonical_dir.join("x").join("..").join("x").join("file.txt");
        let resource = Resource::from_path(&composed).unwrap();
        assert!(resource.alias().is_none());
        assert_eq!(
            resource.canonical().as_path(),
            canonical_dir.join("x").join("file.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_always_alias() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        let target = canonical_dir.join("target.txt");
        let link = canonical_dir.join("link.txt");
        fs::write(&target, "x").unwrap();
        symlink(&target, &link).unwrap();

        let resource = Resource::from_path(&link).unwrap();
        assert!(resource.exists().unwrap());
        assert_eq!(resource.alias().map(CanonicalPath::as_path), Some(target.as_path()));
    }

    #[test]
    fn test_add_path_rejects_rooted_segment() {
        let dir = tempdir().unwrap();
        let resource = Resource::from_path(dir.path()).unwrap();
        let err = resource.add_path("/etc/passwd").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_add_path_matches_direct_construction() {
        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir(canonical_dir.join("x")).unwrap();
        fs::write(canonical_dir.join("x").join("file.txt"), "x").unwrap();

        let parent = Resource::from_path(&canonical_dir).unwrap();
        let child = parent.add_path("x/../x/file.txt").unwrap();
        let direct = Resource::from_path(canonical_dir.join("x").join("file.txt")).unwrap();

        assert_eq!(child.alias().is_none(), direct.alias().is_none());
        assert_eq!(child.canonical(), direct.canonical());
    }

    #[test]
    fn test_is_directory() {
        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        let file = canonical_dir.join("f.txt");
        fs::write(&file, "x").unwrap();

        assert!(Resource::from_path(&canonical_dir).unwrap().is_directory().unwrap());
        assert!(!Resource::from_path(&file).unwrap().is_directory().unwrap());
    }

    #[test]
    fn test_relative_input_resolves_under_configured_base() {
        let dir = tempdir().unwrap();
        let canonical_dir = fs::canonicalize(dir.path()).unwrap();
        fs::write(canonical_dir.join("hosted.txt"), "x").unwrap();

        let config = Config {
            base_dir: Some(canonical_dir.clone()),
            ..Config::default()
        };
        let resource =
            Resource::resolve(ResourceInput::Path(PathBuf::from("hosted.txt")), &config)
                .unwrap();
        assert_eq!(
            resource.canonical().as_path(),
            canonical_dir.join("hosted.txt")
        );
        assert!(resource.exists().unwrap());
    }
}
