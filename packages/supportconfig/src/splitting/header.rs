//! Header line parsing.

use crate::config::{FILE_NOT_FOUND, HEADER_PREFIX, LINES_SUFFIX, NOTE_SEPARATOR};
use crate::error::{Result, SplitError};

/// Recover the original path from a section header line.
///
/// Accepts `# <path>` and `# <path> - Last <N> Lines`.
///
/// # Returns
/// * `Ok(Some(path))` with the bare path as written in the report
/// * `Ok(None)` when the collector recorded that the file was not found
///
/// # Errors
/// `InvalidEntry` if the line does not start with `"# "`.
///
/// # Examples
/// ```
/// use supportconfig::splitting::header_to_path;
///
/// assert_eq!(
///     header_to_path("# /var/log/warn - Last 500 Lines").unwrap(),
///     Some("/var/log/warn")
/// );
/// assert_eq!(header_to_path("# /etc/hosts - File not found").unwrap(), None);
/// assert!(header_to_path("/etc/hosts").is_err());
/// ```
pub fn header_to_path(header: &str) -> Result<Option<&str>> {
    let rest = header
        .strip_prefix(HEADER_PREFIX)
        .ok_or_else(|| SplitError::InvalidEntry(header.to_string()))?;

    if rest.contains(FILE_NOT_FOUND) {
        return Ok(None);
    }

    if rest.ends_with(LINES_SUFFIX) {
        if let Some(idx) = rest.rfind(NOTE_SEPARATOR).filter(|&idx| idx > 0) {
            return Ok(Some(&rest[..idx]));
        }
    }

    Ok(Some(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_header() {
        assert_eq!(
            header_to_path("# /etc/SuSE-release").unwrap(),
            Some("/etc/SuSE-release")
        );
    }

    #[test]
    fn test_truncation_note_is_stripped() {
        assert_eq!(
            header_to_path("# /var/log/nodes/logname.log - Last 10000 Lines").unwrap(),
            Some("/var/log/nodes/logname.log")
        );
    }

    #[test]
    fn test_last_separator_wins() {
        assert_eq!(
            header_to_path("# /srv/a - b/c.log - Last 5 Lines").unwrap(),
            Some("/srv/a - b/c.log")
        );
    }

    #[test]
    fn test_lines_suffix_without_separator_kept() {
        assert_eq!(
            header_to_path("# /opt/Some Lines").unwrap(),
            Some("/opt/Some Lines")
        );
        // Separator at the very start is not treated as a note.
        assert_eq!(
            header_to_path("#  - 3 Lines").unwrap(),
            Some(" - 3 Lines")
        );
    }

    #[test]
    fn test_file_not_found_is_skipped() {
        assert_eq!(
            header_to_path("# /etc/sysconfig/foo - File not found").unwrap(),
            None
        );
    }

    #[test]
    fn test_missing_prefix_is_invalid() {
        for header in ["", "#", "#/etc/hosts", "/etc/hosts", " # /etc/hosts"] {
            assert!(
                matches!(header_to_path(header), Err(SplitError::InvalidEntry(_))),
                "expected invalid entry for {header:?}"
            );
        }
    }
}
