//! Filesystem probing primitives for alias detection.
//!
//! The probe answers two questions and nothing else: does a path
//! exist, and did the filesystem "see through" byte differences
//! between the name a caller used and the name it actually served.
//! All OS-specific behavior lives behind the [`FileSystemProbe`]
//! trait so the alias decision logic stays platform-agnostic and can
//! be exercised against a fake probe.
//!
//! The identity probe deliberately avoids comparing two normalized
//! strings: normalization erases exactly the evidence (case, NUL
//! bytes) this component exists to catch. Instead it walks the
//! literal requested form and checks each component against the
//! byte-exact entry name the directory itself reports.

pub mod artifacts;

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Outcome of an identity probe.
///
/// [`ProbeIdentity::Exact`] means the literal bytes of the requested
/// form are precisely what the filesystem used to locate the
/// resource. Every other variant is a divergence — an alias — and
/// names the mechanism behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeIdentity {
    /// The requested bytes are exactly what the filesystem serves.
    Exact,
    /// The name carries bytes the OS discards when opening (NUL).
    TrailingArtifact,
    /// A component's on-disk name differs byte-for-byte from the
    /// requested one (case-insensitive volume, short-name lookup).
    NameVariant,
    /// The requested form traverses a symlink.
    SymlinkTraversal,
    /// The resolved location differs for some other reason.
    Diverged,
}

impl ProbeIdentity {
    /// Whether this outcome confirms byte-exact identity.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }
}

/// Filesystem state queries used by the alias checker.
///
/// Implementations must use primitives that do not mask byte
/// differences; see [`OsProbe`] for the real one. Probe failures are
/// inconclusive: callers must fail closed, never default to "not an
/// alias".
#[cfg_attr(test, mockall::automock)]
pub trait FileSystemProbe {
    /// Whether the exact bytes of `path` address an existing entity.
    ///
    /// Performs a direct stat with no normalization. Names with an
    /// embedded NUL are resolved the way a lenient filesystem
    /// resolves them (the NUL and everything after it is ignored), so
    /// the answer matches what such a platform would serve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProbeFailed`] for I/O failures other than
    /// plain nonexistence.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Whether the filesystem serves `requested` under exactly those
    /// bytes, or under some other name.
    ///
    /// `requested` must be the literal form (absolute, dot-free,
    /// evidence preserved); `canonical` is the OS-resolved form it is
    /// compared against.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProbeFailed`] when the filesystem cannot be
    /// interrogated; such a failure must be treated as inconclusive.
    fn identity_probe(&self, requested: &Path, canonical: &Path) -> Result<ProbeIdentity>;
}

/// The real probe, backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProbe;

impl OsProbe {
    /// Create a probe over the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `name` appears byte-for-byte in `parent`'s listing.
    ///
    /// Directory listings report the true on-disk names, so a lookup
    /// that succeeded through case folding or a short-name table shows
    /// up here as a mismatch.
    fn name_on_disk(parent: &Path, name: &std::ffi::OsStr) -> Result<bool> {
        let entries = fs::read_dir(parent).map_err(|e| Error::ProbeFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::ProbeFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
            if entry.file_name() == name {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl FileSystemProbe for OsProbe {
    fn exists(&self, path: &Path) -> Result<bool> {
        let opened = artifacts::literal_open_form(path);
        match fs::metadata(opened.as_ref()) {
            Ok(_) => Ok(true),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::InvalidInput
                ) =>
            {
                Ok(false)
            }
            Err(e) => Err(Error::ProbeFailed {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn identity_probe(&self, requested: &Path, canonical: &Path) -> Result<ProbeIdentity> {
        if artifacts::contains_nul(requested.as_os_str()) {
            return Ok(ProbeIdentity::TrailingArtifact);
        }

        let mut walked = PathBuf::new();
        // Once a component is missing there is nothing on disk for the
        // rest of the request to alias; the tail is compared lexically.
        let mut missing = false;

        for component in requested.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    walked.push(component.as_os_str());
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    walked.pop();
                }
                Component::Normal(name) => {
                    let candidate = walked.join(name);
                    if !missing {
                        match fs::symlink_metadata(&candidate) {
                            Ok(meta) => {
                                if meta.file_type().is_symlink() {
                                    return Ok(ProbeIdentity::SymlinkTraversal);
                                }
                                if !Self::name_on_disk(&walked, name)? {
                                    return Ok(ProbeIdentity::NameVariant);
                                }
                            }
                            Err(e)
                                if matches!(
                                    e.kind(),
                                    ErrorKind::NotFound | ErrorKind::NotADirectory
                                ) =>
                            {
                                missing = true;
                            }
                            Err(e) if e.kind() == ErrorKind::InvalidInput => {
                                return Ok(ProbeIdentity::TrailingArtifact);
                            }
                            Err(e) => {
                                return Err(Error::ProbeFailed {
                                    path: candidate,
                                    source: e,
                                });
                            }
                        }
                    }
                    walked = candidate;
                }
            }
        }

        if walked == canonical {
            Ok(ProbeIdentity::Exact)
        } else {
            Ok(ProbeIdentity::Diverged)
        }
    }
}
