//! Types for the file splitter.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::registry::SectionSink;

/// Outcome of splitting one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    /// Destination files created, in report order.
    pub files_written: Vec<PathBuf>,

    /// Header lines of sections that produced no file.
    pub skipped: Vec<String>,

    /// Section markers seen in the report, of any kind.
    pub sections: usize,
}

impl SplitSummary {
    /// Number of files written.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files_written.len()
    }
}

/// Buffered destination file for one section.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Wrap a freshly created destination file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, file: File) -> Self {
        Self {
            path: path.into(),
            writer: BufWriter::new(file),
        }
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl SectionSink for FileSink {
    fn close(self: Box<Self>) -> io::Result<()> {
        let file = self.writer.into_inner().map_err(io::IntoInnerError::into_error)?;
        tracing::trace!(path = %self.path.display(), "Destination file closed");
        drop(file);
        Ok(())
    }
}
