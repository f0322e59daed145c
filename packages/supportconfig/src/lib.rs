//! Supportconfig splitter - Recover collected files from a supportconfig report.
//!
//! A supportconfig report is one long text file in which the collector
//! concatenated command output, configuration files and log excerpts, each
//! introduced by a marker such as `#==[ Configuration File ]=====#`. This
//! crate parses that stream and writes the configuration and log files back
//! out as separate files.
//!
//! # Example
//!
//! ```
//! use supportconfig::splitting::{FileSplitter, SplitConfig};
//!
//! let report = "\
//! #==[ Configuration File ]===========================#
//! ## /etc/hostname
//! node01
//! ";
//!
//! let out = tempfile::tempdir().unwrap();
//! let splitter = FileSplitter::new(SplitConfig::new(out.path()));
//! let summary = splitter.split(report.as_bytes()).unwrap();
//!
//! assert_eq!(summary.file_count(), 1);
//! let content = std::fs::read_to_string(out.path().join("etc/hostname")).unwrap();
//! assert_eq!(content, "node01\n");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and section marker recognition
//! - [`error`]: Error types and Result alias
//! - [`registry`]: Handler registry and streaming section parser
//! - [`splitting`]: File splitter, path confinement and remapping
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod splitting;

// Re-export commonly used items
pub use error::{Result, SplitError};
pub use registry::{HandlerOutcome, ParseStats, SectionHandler, SectionParser, SectionRegistry, SectionSink};
pub use splitting::{FileSplitter, SplitConfig, SplitSummary};
