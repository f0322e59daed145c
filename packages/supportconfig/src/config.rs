//! Configuration constants and marker recognition for supportconfig reports.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::error::{Result, SplitError};

/// Literal prefix every section marker line starts with.
pub const SECTION_MARKER_PREFIX: &str = "#==[ ";

/// Prefix of the header line that carries the original path.
pub const HEADER_PREFIX: &str = "# ";

/// Header note written by the collector when a path did not exist.
pub const FILE_NOT_FOUND: &str = "File not found";

/// Suffix of truncated-log headers (`# /var/log/messages - Last 500 Lines`).
pub const LINES_SUFFIX: &str = " Lines";

/// Separator between the path and the truncation note.
pub const NOTE_SEPARATOR: &str = " - ";

/// Section kind for collected configuration files.
pub const CONFIGURATION_FILE: &str = "Configuration File";

/// Section kind for collected log excerpts.
pub const LOG_FILE: &str = "Log File";

/// Section kinds the file splitter extracts.
pub const SPLIT_SECTION_KINDS: [&str; 2] = [CONFIGURATION_FILE, LOG_FILE];

/// Section marker: `#==[ <kind> ]=====...`. Unicode is off so any byte
/// sequence can appear in the kind.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s-u)^#==\[ (.*?) \]=+").expect("valid regex"));

/// Extract the section kind from a marker line.
///
/// Returns `None` for anything that is not a complete marker, including
/// lines that only share the `#==[ ` prefix.
///
/// # Examples
/// ```
/// use supportconfig::config::parse_marker;
///
/// assert_eq!(
///     parse_marker(b"#==[ Log File ]=========#").as_deref(),
///     Some("Log File")
/// );
/// assert_eq!(parse_marker(b"#==[ broken"), None);
/// assert_eq!(parse_marker(b"# /etc/hosts"), None);
/// ```
#[must_use]
pub fn parse_marker(line: &[u8]) -> Option<String> {
    if !line.starts_with(SECTION_MARKER_PREFIX.as_bytes()) {
        return None;
    }
    SECTION_MARKER_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|kind| String::from_utf8_lossy(kind.as_bytes()).into_owned())
}

/// Make sure the destination root is usable.
///
/// Creates the directory when it does not exist yet.
///
/// # Errors
/// `InvalidOutputDir` if the path exists but is not a directory,
/// `CreateDir` if it cannot be created.
pub fn validate_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(SplitError::InvalidOutputDir(path.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|source| SplitError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
