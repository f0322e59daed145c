//! Path confinement for recovered source paths.
//!
//! Everything here is pure string work. Nothing touches the filesystem, so
//! the confinement guarantee can be tested exhaustively.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, SplitError};

/// A source path normalised so that it can only name a location below a
/// destination root.
///
/// The path is kept as a list of plain segments: no empty segments, no `.`
/// and no `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedPath {
    rooted: String,
    segments: Vec<String>,
}

impl SanitizedPath {
    /// Rooted form, e.g. `/etc/os-release`. This is what path remappers see.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rooted
    }

    /// The plain segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Relative path to join onto the destination root.
    #[must_use]
    pub fn to_relative(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for SanitizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rooted)
    }
}

/// Lexically clean a path and confine it below `/`.
///
/// The path is treated as if it were rooted: `..` at the top is dropped
/// instead of climbing, so `/var/../../../.vimrc` becomes `/.vimrc` and
/// `../x` becomes `/x`.
///
/// # Errors
/// `InvalidEntry` if nothing is left after cleaning, or if a segment holds a
/// NUL byte.
///
/// # Examples
/// ```
/// use supportconfig::splitting::sanitize_path;
///
/// let path = sanitize_path("/var/../../../../../.vimrc").unwrap();
/// assert_eq!(path.as_str(), "/.vimrc");
/// assert!(sanitize_path("/..").is_err());
/// ```
pub fn sanitize_path(raw: &str) -> Result<SanitizedPath> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in raw.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\0') => return Err(SplitError::InvalidEntry(raw.to_string())),
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(SplitError::InvalidEntry(raw.to_string()));
    }

    Ok(SanitizedPath {
        rooted: format!("/{}", segments.join("/")),
        segments: segments.into_iter().map(String::from).collect(),
    })
}

/// `/` everywhere; `\` too on Windows, where it is a separator for `PathBuf`.
fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}
