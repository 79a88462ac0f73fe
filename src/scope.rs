//! Scoped base-directory overrides for relative-path resolution.
//!
//! Relative requested forms normally resolve against the process
//! current directory. A caller that resolves resources on behalf of
//! several hosted roots can instead acquire a scoped override: while
//! the guard is alive, relative paths on the current thread resolve
//! against the given base directory. The previous state is restored
//! when the guard drops, on every exit path including panics.
//!
//! The override is thread-local, so concurrent callers on different
//! threads never observe each other's scopes and there is no global
//! mutable state to save and restore by hand.
//!
//! # Examples
//!
//! ```no_run
//! use fsalias::{scope, Resource};
//! use std::path::Path;
//!
//! let _guard = scope::enter(Path::new("/srv/webroot"));
//! // "index.html" now resolves against /srv/webroot on this thread.
//! let resource = Resource::new("index.html").unwrap();
//! // dropping the guard restores the previous base
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};

thread_local! {
    static BASE_STACK: RefCell<Vec<PathBuf>> = const { RefCell::new(Vec::new()) };
}

/// Guard for a scoped base-directory override.
///
/// The override is active on the current thread for the lifetime of
/// the guard and is removed when the guard drops. Guards nest:
/// dropping the innermost guard re-exposes the enclosing scope.
#[derive(Debug)]
#[must_use = "the override ends when the guard is dropped"]
pub struct BaseDirGuard {
    // Non-Send by construction: the override lives in a thread-local,
    // so the guard must drop on the thread that created it.
    _not_send: std::marker::PhantomData<*const ()>,
}

impl Drop for BaseDirGuard {
    fn drop(&mut self) {
        BASE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Acquire a scoped base-directory override on the current thread.
///
/// Relative requested forms resolve against `base` until the returned
/// guard is dropped.
///
/// # Examples
///
/// ```
/// use fsalias::scope;
/// use std::path::Path;
///
/// assert_eq!(scope::current_base(), None);
/// {
///     let _guard = scope::enter(Path::new("/srv/a"));
///     assert_eq!(scope::current_base().as_deref(), Some(Path::new("/srv/a")));
/// }
/// assert_eq!(scope::current_base(), None);
/// ```
pub fn enter(base: &Path) -> BaseDirGuard {
    BASE_STACK.with(|stack| {
        stack.borrow_mut().push(base.to_path_buf());
    });
    BaseDirGuard {
        _not_send: std::marker::PhantomData,
    }
}

/// Run a closure with a scoped base-directory override.
///
/// Equivalent to acquiring a guard around the closure; the override is
/// removed even if the closure panics.
///
/// # Examples
///
/// ```
/// use fsalias::scope;
/// use std::path::Path;
///
/// let base = scope::with_base(Path::new("/srv/b"), || scope::current_base());
/// assert_eq!(base.as_deref(), Some(Path::new("/srv/b")));
/// assert_eq!(scope::current_base(), None);
/// ```
pub fn with_base<R>(base: &Path, f: impl FnOnce() -> R) -> R {
    let _guard = enter(base);
    f()
}

/// The base directory currently in scope on this thread, if any.
#[must_use]
pub fn current_base() -> Option<PathBuf> {
    BASE_STACK.with(|stack| stack.borrow().last().cloned())
}
