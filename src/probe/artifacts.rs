//! Byte-level name artifacts that filesystems resolve leniently.
//!
//! A requested name can carry bytes the operating system discards when
//! opening — the classic case is an embedded NUL, which C-string based
//! filesystem interfaces treat as a terminator. Rust's standard
//! library refuses to pass such names to the OS at all, so the lenient
//! behavior is emulated here deterministically: the "opened" form of a
//! name is its prefix up to the first NUL. That makes the divergence
//! observable on every platform rather than only on the lenient ones.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;

/// Whether any component of the path carries an embedded NUL.
#[must_use]
pub fn contains_nul(name: &OsStr) -> bool {
    name.as_encoded_bytes().contains(&0)
}

/// The path the operating system would actually open for these bytes.
///
/// Returns the path truncated at its first NUL byte; borrows the
/// original when there is nothing to truncate. Everything after the
/// NUL — including whole subsequent components — is discarded, which
/// is exactly what a NUL-terminating filesystem interface does.
///
/// # Examples
///
/// ```
/// use fsalias::probe::artifacts::literal_open_form;
/// use std::path::Path;
///
/// let clean = Path::new("/var/www/test.txt");
/// assert_eq!(literal_open_form(clean).as_ref(), clean);
/// ```
#[must_use]
pub fn literal_open_form(path: &Path) -> Cow<'_, Path> {
    if !contains_nul(path.as_os_str()) {
        return Cow::Borrowed(path);
    }
    Cow::Owned(truncate_at_nul(path.as_os_str()).into())
}

#[cfg(unix)]
fn truncate_at_nul(name: &OsStr) -> std::ffi::OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = name.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::ffi::OsString::from_vec(bytes[..end].to_vec())
}

#[cfg(windows)]
fn truncate_at_nul(name: &OsStr) -> std::ffi::OsString {
    use std::os::windows::ffi::{OsStrExt, OsStringExt};

    let wide: Vec<u16> = name.encode_wide().take_while(|&u| u != 0).collect();
    std::ffi::OsString::from_wide(&wide)
}

#[cfg(not(any(unix, windows)))]
fn truncate_at_nul(name: &OsStr) -> std::ffi::OsString {
    let text = name.to_string_lossy();
    let end = text.find('\0').unwrap_or(text.len());
    std::ffi::OsString::from(text[..end].to_string())
}
