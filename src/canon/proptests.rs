//! Property-based tests for the canonicalizer, gated behind the
//! `property-tests` feature because they create real filesystem trees.

use proptest::prelude::*;
use tempfile::tempdir;

use super::Canonicalizer;
use crate::input::ResourceInput;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,12}"
}

proptest! {
    /// Canonical forms are always absolute.
    #[test]
    fn canonical_always_absolute(name in name_strategy()) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(&name);
        std::fs::write(&path, "x").unwrap();

        let canonicalizer = Canonicalizer::new();
        let canonical = canonicalizer.canonicalize_path(&path).unwrap();
        prop_assert!(canonical.as_path().is_absolute());
    }

    /// Canonicalization is idempotent: resolving a canonical form
    /// yields itself.
    #[test]
    fn canonicalize_idempotent(name in name_strategy()) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(&name);
        std::fs::write(&path, "x").unwrap();

        let canonicalizer = Canonicalizer::new();
        let once = canonicalizer.canonicalize_path(&path).unwrap();
        let twice = canonicalizer.canonicalize_path(once.as_path()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// The path form and its file URL resolve identically.
    #[test]
    fn surface_forms_agree(name in name_strategy()) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(&name);
        std::fs::write(&path, "x").unwrap();

        let canonicalizer = Canonicalizer::new();
        let from_path = canonicalizer
            .canonicalize(&ResourceInput::from(path.as_path()))
            .unwrap();
        let url = url::Url::from_file_path(&path).unwrap();
        let from_url = canonicalizer
            .canonicalize(&ResourceInput::from(url))
            .unwrap();
        prop_assert_eq!(from_path, from_url);
    }
}
