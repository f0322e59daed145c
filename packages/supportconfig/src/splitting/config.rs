//! Configuration for the file splitter.

use std::fmt;
use std::path::{Path, PathBuf};

use super::remap::PathRemapper;
use super::splitter::FileSplitter;
use crate::config::SPLIT_SECTION_KINDS;
use crate::registry::SectionRegistry;

/// Settings for the file splitter.
pub struct SplitConfig {
    /// Base destination directory.
    pub base: PathBuf,

    /// Optional remapper from cleaned source path to destination path.
    pub remapper: Option<Box<dyn PathRemapper>>,
}

impl SplitConfig {
    /// Create a config writing below `base`, without remapping.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            remapper: None,
        }
    }

    /// Set the path remapper.
    #[must_use]
    pub fn with_remapper(mut self, remapper: impl PathRemapper + 'static) -> Self {
        self.remapper = Some(Box::new(remapper));
        self
    }

    /// Base destination directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl fmt::Debug for SplitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitConfig")
            .field("base", &self.base)
            .field("has_remapper", &self.remapper.is_some())
            .finish()
    }
}

/// Create a section registry with the splitter bound to every file kind.
///
/// The splitter handles `Configuration File` and `Log File` sections;
/// everything else in the report is ignored.
#[must_use]
pub fn create_split_registry(splitter: &FileSplitter) -> SectionRegistry<'_> {
    let mut registry = SectionRegistry::new();
    for kind in SPLIT_SECTION_KINDS {
        registry.register(kind, splitter);
    }
    registry
}
