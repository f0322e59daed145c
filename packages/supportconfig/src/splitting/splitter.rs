//! File splitter: turns configuration and log sections back into files.

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::BufRead;
use std::path::PathBuf;

use super::config::{create_split_registry, SplitConfig};
use super::header::header_to_path;
use super::path::{sanitize_path, SanitizedPath};
use super::types::{FileSink, SplitSummary};
use crate::error::{Result, SplitError};
use crate::registry::{HandlerOutcome, SectionHandler, SectionParser};

/// Section handler that writes each file section to disk.
///
/// For every section it recovers the original path from the header,
/// confines it below the base directory, applies the optional remapper,
/// creates the parent directories and hands back the opened file as the
/// section sink.
#[derive(Debug)]
pub struct FileSplitter {
    config: SplitConfig,
    summary: RefCell<SplitSummary>,
}

impl FileSplitter {
    /// Create a new splitter.
    #[must_use]
    pub fn new(config: SplitConfig) -> Self {
        Self {
            config,
            summary: RefCell::new(SplitSummary::default()),
        }
    }

    /// Get the splitter configuration.
    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Split a report into files below the base directory.
    ///
    /// # Returns
    /// Summary of the files written and sections skipped by this call
    ///
    /// # Errors
    /// The first fatal error: a corrupt header, a rejected remap, or an I/O
    /// failure. Files written for earlier sections stay on disk.
    pub fn split(&self, source: impl BufRead) -> Result<SplitSummary> {
        self.summary.replace(SplitSummary::default());

        let parser = SectionParser::new(create_split_registry(self));
        let stats = parser.parse(source)?;

        let mut summary = self.summary.take();
        summary.sections = stats.sections;

        tracing::info!(
            files = summary.file_count(),
            skipped = summary.skipped.len(),
            sections = summary.sections,
            "Report split"
        );
        Ok(summary)
    }

    /// Resolve the destination for a header line.
    ///
    /// Returns `None` when the section should be skipped.
    fn destination(&self, header: &str) -> Result<Option<SanitizedPath>> {
        let Some(raw) = header_to_path(header)? else {
            return Ok(None);
        };
        let cleaned = sanitize_path(raw)?;

        let Some(remapper) = &self.config.remapper else {
            return Ok(Some(cleaned));
        };
        match remapper.remap(cleaned.as_str())? {
            Some(remapped) => sanitize_path(&remapped).map(Some),
            None => Ok(None),
        }
    }

    /// Create parent directories and open the destination for writing.
    ///
    /// Directories are created one segment at a time below the base. A
    /// symlink at any segment, or at the file itself, is refused before
    /// anything is created through it.
    fn create_destination(&self, destination: &SanitizedPath) -> Result<(PathBuf, File)> {
        let base = &self.config.base;
        let path = base.join(destination.to_relative());

        fs::create_dir_all(base).map_err(|source| SplitError::CreateDir {
            path: base.clone(),
            source,
        })?;

        let (_, parents) = destination
            .segments()
            .split_last()
            .ok_or_else(|| SplitError::InvalidEntry(destination.to_string()))?;
        let mut dir = base.clone();
        for segment in parents {
            dir.push(segment);
            match fs::symlink_metadata(&dir) {
                Ok(meta) if meta.file_type().is_symlink() => {
                    return Err(SplitError::EscapesBase(path));
                }
                Ok(meta) if meta.is_dir() => {}
                _ => fs::create_dir(&dir).map_err(|source| SplitError::CreateDir {
                    path: dir.clone(),
                    source,
                })?,
            }
        }

        if fs::symlink_metadata(&path).is_ok_and(|meta| meta.file_type().is_symlink()) {
            return Err(SplitError::EscapesBase(path));
        }

        let file = File::create(&path).map_err(|source| SplitError::CreateFile {
            path: path.clone(),
            source,
        })?;
        Ok((path, file))
    }

    fn record_skip(&self, kind: &str, header: &str) {
        tracing::debug!(kind = %kind, header = %header, "Section skipped");
        self.summary.borrow_mut().skipped.push(header.to_string());
    }
}

impl SectionHandler for FileSplitter {
    fn handle(&self, kind: &str, header: &str) -> Result<HandlerOutcome> {
        let Some(destination) = self.destination(header)? else {
            self.record_skip(kind, header);
            return Ok(HandlerOutcome::Skip);
        };

        let (path, file) = self.create_destination(&destination)?;
        tracing::info!(kind = %kind, source = %destination, path = %path.display(), "Writing file");
        self.summary.borrow_mut().files_written.push(path.clone());

        Ok(HandlerOutcome::sink(FileSink::new(path, file)))
    }
}

impl SectionHandler for &FileSplitter {
    fn handle(&self, kind: &str, header: &str) -> Result<HandlerOutcome> {
        (**self).handle(kind, header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::{Flatten, UniqueNames};
    use std::path::Path;
    use tempfile::tempdir;

    fn splitter_in(base: &Path) -> FileSplitter {
        FileSplitter::new(SplitConfig::new(base))
    }

    #[test]
    fn test_handle_creates_nested_file() {
        let tmp = tempdir().unwrap();
        let splitter = splitter_in(tmp.path());

        let outcome = splitter
            .handle("Configuration File", "# /etc/sysconfig/network/config")
            .unwrap();

        assert!(!outcome.is_skip());
        assert!(tmp.path().join("etc/sysconfig/network/config").is_file());
    }

    #[test]
    fn test_handle_invalid_header() {
        let tmp = tempdir().unwrap();
        let splitter = splitter_in(tmp.path());

        let err = splitter.handle("Log File", "/var/log/messages").unwrap_err();
        assert!(matches!(err, SplitError::InvalidEntry(_)));
    }

    #[test]
    fn test_handle_empty_path_is_invalid() {
        let tmp = tempdir().unwrap();
        let splitter = splitter_in(tmp.path());

        let err = splitter.handle("Log File", "# /../..").unwrap_err();
        assert!(matches!(err, SplitError::InvalidEntry(_)));
    }

    #[test]
    fn test_handle_file_not_found_skips() {
        let tmp = tempdir().unwrap();
        let splitter = splitter_in(tmp.path());

        let outcome = splitter
            .handle("Configuration File", "# /etc/foo.conf - File not found")
            .unwrap();

        assert!(outcome.is_skip());
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
        assert_eq!(splitter.summary.borrow().skipped.len(), 1);
    }

    #[test]
    fn test_handle_remap_skip() {
        let tmp = tempdir().unwrap();
        let config = SplitConfig::new(tmp.path())
            .with_remapper(|_: &str| -> Result<Option<String>> { Ok(None) });
        let splitter = FileSplitter::new(config);

        let outcome = splitter.handle("Log File", "# /var/log/warn").unwrap();
        assert!(outcome.is_skip());
    }

    #[test]
    fn test_handle_remap_error_propagates() {
        let tmp = tempdir().unwrap();
        let config = SplitConfig::new(tmp.path()).with_remapper(
            |path: &str| -> Result<Option<String>> {
                Err(SplitError::Remap {
                    path: path.to_string(),
                    reason: "denied".to_string(),
                })
            },
        );
        let splitter = FileSplitter::new(config);

        let err = splitter.handle("Log File", "# /var/log/warn").unwrap_err();
        assert!(matches!(err, SplitError::Remap { ref path, .. } if path == "/var/log/warn"));
    }

    #[test]
    fn test_remapped_path_is_confined() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("out");
        let config = SplitConfig::new(&base).with_remapper(
            |_: &str| -> Result<Option<String>> { Ok(Some("../../escaped".to_string())) },
        );
        let splitter = FileSplitter::new(config);

        splitter.handle("Log File", "# /var/log/warn").unwrap();
        assert!(base.join("escaped").is_file());
        assert!(!tmp.path().join("escaped").exists());
    }

    #[test]
    fn test_flatten_and_unique() {
        let tmp = tempdir().unwrap();
        let config = SplitConfig::new(tmp.path()).with_remapper(
            crate::splitting::RemapChain::new()
                .with(Flatten)
                .with(UniqueNames::new()),
        );
        let splitter = FileSplitter::new(config);

        splitter.handle("Log File", "# /var/log/warn").unwrap();
        splitter.handle("Log File", "# /var/log/warn - Last 10 Lines").unwrap();

        assert!(tmp.path().join("var_log_warn").is_file());
        assert!(tmp.path().join("var_log_warn.1").is_file());
    }

    #[test]
    fn test_create_dir_failure_is_fatal() {
        let tmp = tempdir().unwrap();
        // A regular file where a directory is needed.
        fs::write(tmp.path().join("etc"), "not a dir").unwrap();
        let splitter = splitter_in(tmp.path());

        let err = splitter.handle("Configuration File", "# /etc/hosts").unwrap_err();
        assert!(matches!(err, SplitError::CreateDir { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_rejected() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("out");
        let outside = tmp.path().join("outside");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, base.join("etc")).unwrap();
        let splitter = splitter_in(&base);

        let err = splitter.handle("Configuration File", "# /etc/hosts").unwrap_err();
        assert!(matches!(err, SplitError::EscapesBase(_)));
        assert!(!outside.join("hosts").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_creates_nothing_outside() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("out");
        let outside = tmp.path().join("outside");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, base.join("etc")).unwrap();
        let splitter = splitter_in(&base);

        let err = splitter
            .handle("Configuration File", "# /etc/deep/nested/hosts")
            .unwrap_err();
        assert!(matches!(err, SplitError::EscapesBase(_)));
        assert!(!outside.join("deep").exists());
        assert_eq!(fs::read_dir(&outside).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_rejected() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().join("out");
        fs::create_dir_all(base.join("etc")).unwrap();
        let target = tmp.path().join("victim");
        fs::write(&target, "keep me").unwrap();
        std::os::unix::fs::symlink(&target, base.join("etc/hosts")).unwrap();
        let splitter = splitter_in(&base);

        let err = splitter.handle("Configuration File", "# /etc/hosts").unwrap_err();
        assert!(matches!(err, SplitError::EscapesBase(_)));
        assert_eq!(fs::read_to_string(&target).unwrap(), "keep me");
    }

    #[test]
    fn test_split_resets_summary() {
        let tmp = tempdir().unwrap();
        let splitter = splitter_in(tmp.path());
        let report = "#==[ Log File ]====#\n# /var/log/warn\nline\n";

        let first = splitter.split(report.as_bytes()).unwrap();
        let second = splitter.split(report.as_bytes()).unwrap();

        assert_eq!(first.file_count(), 1);
        assert_eq!(first, second);
    }
}
