//! File splitting for supportconfig reports.
//!
//! Recovers `Configuration File` and `Log File` sections as individual files
//! below a destination directory, with every destination confined to that
//! directory.

mod config;
mod header;
mod path;
mod remap;
mod splitter;
mod types;

pub use config::{create_split_registry, SplitConfig};
pub use header::header_to_path;
pub use path::{sanitize_path, SanitizedPath};
pub use remap::{ExcludePrefixes, Flatten, PathRemapper, RemapChain, UniqueNames};
pub use splitter::FileSplitter;
pub use types::{FileSink, SplitSummary};
