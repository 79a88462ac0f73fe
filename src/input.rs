//! The supported surface forms of a requested resource.
//!
//! A resource can be requested as a raw path, an absolute path, a
//! parsed `file://` URL, or a URL string. All four funnel into
//! [`ResourceInput`], so every entry point of the crate accepts every
//! form and two forms denoting the same file produce equivalent
//! resources.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// A requested resource in one of the supported surface forms.
///
/// The input is preserved verbatim; conversion to a path happens in
/// [`ResourceInput::to_path`] without mutating the original.
///
/// # Examples
///
/// ```
/// use fsalias::ResourceInput;
/// use std::path::Path;
///
/// let from_str = ResourceInput::parse("/var/www/index.html").unwrap();
/// let from_path = ResourceInput::from(Path::new("/var/www/index.html"));
/// assert_eq!(from_str.to_path().unwrap(), from_path.to_path().unwrap());
///
/// let from_url = ResourceInput::parse("file:///var/www/index.html").unwrap();
/// assert_eq!(from_url.to_path().unwrap(), from_path.to_path().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceInput {
    /// A filesystem path, relative or absolute.
    Path(PathBuf),
    /// A parsed `file` URL.
    Url(Url),
}

impl ResourceInput {
    /// Parse a requested string into a surface form.
    ///
    /// Strings with a `file:` scheme are parsed as URLs; strings with
    /// any other scheme are rejected; everything else is a filesystem
    /// path. Windows drive prefixes (`C:\...`) are paths, not schemes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the string carries a
    /// non-`file` scheme or is not a syntactically valid URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsalias::ResourceInput;
    ///
    /// assert!(ResourceInput::parse("file:///tmp/x").is_ok());
    /// assert!(ResourceInput::parse("relative/path").is_ok());
    /// assert!(ResourceInput::parse("http://host/x").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let lowered = input.to_ascii_lowercase();
        if lowered.starts_with("file:") {
            let url = Url::parse(input).map_err(|e| Error::MalformedInput {
                input: input.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Self::Url(url));
        }

        if let Some((scheme, _rest)) = input.split_once("://") {
            // A one-character prefix is a drive letter, not a scheme.
            if scheme.len() > 1 {
                return Err(Error::MalformedInput {
                    input: input.to_string(),
                    reason: format!("unsupported scheme '{scheme}'"),
                });
            }
        }

        Ok(Self::Path(PathBuf::from(input)))
    }

    /// The literal path this input addresses, before any resolution.
    ///
    /// For the URL form this percent-decodes and converts via
    /// [`Url::to_file_path`], so an encoded traversal sequence
    /// collapses to its path meaning here rather than surviving into
    /// the comparison downstream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if a URL cannot be converted
    /// to a local filesystem path (non-`file` scheme, foreign host, or
    /// a segment the platform cannot represent).
    pub fn to_path(&self) -> Result<PathBuf> {
        match self {
            Self::Path(path) => Ok(path.clone()),
            Self::Url(url) => {
                if url.scheme() != "file" {
                    return Err(Error::MalformedInput {
                        input: url.as_str().to_string(),
                        reason: format!("unsupported scheme '{}'", url.scheme()),
                    });
                }
                url.to_file_path().map_err(|()| Error::MalformedInput {
                    input: url.as_str().to_string(),
                    reason: "URL does not address a local filesystem path".to_string(),
                })
            }
        }
    }
}

impl fmt::Display for ResourceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

impl From<PathBuf> for ResourceInput {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ResourceInput {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Url> for ResourceInput {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let input = ResourceInput::parse("/var/www/site").unwrap();
        assert_eq!(input, ResourceInput::Path(PathBuf::from("/var/www/site")));
    }

    #[test]
    fn test_parse_relative_path() {
        let input = ResourceInput::parse("docs/readme.txt").unwrap();
        assert_eq!(input.to_path().unwrap(), PathBuf::from("docs/readme.txt"));
    }

    #[test]
    fn test_parse_file_url() {
        let input = ResourceInput::parse("file:///var/www/site").unwrap();
        assert!(matches!(input, ResourceInput::Url(_)));
        assert_eq!(input.to_path().unwrap(), PathBuf::from("/var/www/site"));
    }

    #[test]
    fn test_parse_file_url_uppercase_scheme() {
        let input = ResourceInput::parse("FILE:///var/www/site").unwrap();
        assert!(matches!(input, ResourceInput::Url(_)));
    }

    #[test]
    fn test_parse_rejects_foreign_scheme() {
        let err = ResourceInput::parse("http://example.com/x").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_rejects_invalid_url() {
        let err = ResourceInput::parse("file://[::invalid]/x").unwrap_err();
        assert!(err.is_malformed());
    }

    #[cfg(unix)]
    #[test]
    fn test_foreign_host_is_not_a_local_path() {
        let input = ResourceInput::parse("file://fileserver/share/x").unwrap();
        let err = input.to_path().unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_url_percent_decoding() {
        let input = ResourceInput::parse("file:///var/www/a%20b.txt").unwrap();
        assert_eq!(input.to_path().unwrap(), PathBuf::from("/var/www/a b.txt"));
    }

    #[test]
    fn test_encoded_traversal_decodes_to_path_meaning() {
        // The URL layer treats encoded dot segments as dot segments,
        // so the traversal collapses instead of surviving as an opaque
        // name that a deny-list would miss.
        let input = ResourceInput::parse("file:///var/www/%2e%2e/secret").unwrap();
        assert_eq!(input.to_path().unwrap(), PathBuf::from("/var/secret"));
    }

    #[test]
    fn test_from_url() {
        let url = Url::parse("file:///tmp/x").unwrap();
        let input = ResourceInput::from(url);
        assert_eq!(input.to_path().unwrap(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_display_roundtrips_readably() {
        let input = ResourceInput::parse("/a/b").unwrap();
        assert_eq!(format!("{input}"), "/a/b");

        let input = ResourceInput::parse("file:///a/b").unwrap();
        assert_eq!(format!("{input}"), "file:///a/b");
    }
}
