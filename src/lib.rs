#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fsalias
//!
//! A library for resolving resource paths to their canonical on-disk
//! form and detecting filesystem aliases.
//!
//! An alias exists when the string a caller used to request a file is
//! not the string the filesystem actually serves: trailing NUL bytes
//! that lenient filesystems discard, differently-cased names on
//! case-insensitive volumes, short alternate names, and symlink
//! traversal. Access rules keyed on the requested string (deny-lists,
//! protected subtrees) can be bypassed through any of these, so a
//! server must confirm that a request is *not* an alias before
//! serving it.
//!
//! ## Core Types
//!
//! - [`Resource`]: the addressable entity — requested form, canonical
//!   form, alias verdict, live existence
//! - [`ResourceInput`]: the four accepted surface forms (raw path,
//!   absolute path, `file://` URL, URL string)
//! - [`Canonicalizer`] and [`CanonicalPath`]: OS-level resolution
//! - [`AliasChecker`] and [`AliasVerdict`]: the classification
//! - [`FileSystemProbe`] / [`OsProbe`]: the platform boundary
//! - [`AliasPolicy`] and [`ProtectedSpace`]: fail-closed serving
//!   decisions
//!
//! ## Examples
//!
//! ```no_run
//! use fsalias::{AliasPolicy, Resource};
//!
//! let resource = Resource::new("/srv/webroot/index.html").unwrap();
//!
//! let policy = AliasPolicy::new();
//! if policy.decide(resource.verdict()).is_allow() {
//!     // the requested string is exactly what the filesystem serves
//!     assert!(resource.alias().is_none());
//! }
//! ```
//!
//! Verdicts are computed once at construction and never change;
//! existence is live:
//!
//! ```no_run
//! use fsalias::Resource;
//!
//! let resource = Resource::new("/srv/webroot/report.pdf").unwrap();
//! let verdict_then = resource.alias().cloned();
//! // ... the file may be deleted meanwhile ...
//! assert_eq!(resource.alias().cloned(), verdict_then);
//! let exists_now = resource.exists().unwrap();
//! # let _ = exists_now;
//! ```

pub mod alias;
pub mod canon;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod policy;
pub mod probe;
pub mod resource;
pub mod scope;

// Re-export key types at crate root for convenience
pub use alias::{AliasChecker, AliasKind, AliasVerdict};
pub use canon::{CanonicalPath, Canonicalizer};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use input::ResourceInput;
pub use logging::{init_logger, LogLevel, Logger};
pub use policy::{AccessDecision, AliasPolicy, ProtectedSpace, SealKey};
pub use probe::{FileSystemProbe, OsProbe, ProbeIdentity};
pub use resource::Resource;
