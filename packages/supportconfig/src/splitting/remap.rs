//! Path remapping applied between path cleaning and file creation.

use std::cell::RefCell;
use std::collections::HashSet;

use crate::error::Result;

/// Trait for destination path remappers.
///
/// A remapper receives the cleaned, rooted source path (e.g.
/// `/etc/os-release`) and returns the destination path to use below the
/// output directory. The result is cleaned again before it is joined, so a
/// remapper cannot escape the output directory either.
pub trait PathRemapper {
    /// Map a source path to a destination path.
    ///
    /// # Returns
    /// * `Ok(Some(path))` to write the section to `path`
    /// * `Ok(None)` to skip the section
    ///
    /// # Errors
    /// Any error aborts the split.
    fn remap(&self, path: &str) -> Result<Option<String>>;
}

impl<F> PathRemapper for F
where
    F: Fn(&str) -> Result<Option<String>>,
{
    fn remap(&self, path: &str) -> Result<Option<String>> {
        self(path)
    }
}

/// Put every file directly in the output directory.
///
/// `/etc/sysconfig/network` becomes `etc_sysconfig_network`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatten;

impl PathRemapper for Flatten {
    fn remap(&self, path: &str) -> Result<Option<String>> {
        Ok(Some(path.trim_start_matches('/').replace('/', "_")))
    }
}

/// Skip paths at or below any of the given prefixes.
#[derive(Debug, Clone, Default)]
pub struct ExcludePrefixes {
    prefixes: Vec<String>,
}

impl ExcludePrefixes {
    /// Create a filter from rooted prefixes such as `/var/log`.
    #[must_use]
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let prefixes = prefixes
            .into_iter()
            .map(|p| {
                let p: String = p.into();
                format!("/{}", p.trim_matches('/'))
            })
            .collect();
        Self { prefixes }
    }

    /// Check if a rooted path falls under one of the prefixes.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            prefix == "/"
                || path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl PathRemapper for ExcludePrefixes {
    fn remap(&self, path: &str) -> Result<Option<String>> {
        if self.is_excluded(path) {
            tracing::debug!(path = %path, "Path excluded");
            return Ok(None);
        }
        Ok(Some(path.to_string()))
    }
}

/// Keep destination names unique within one split.
///
/// The first occurrence of a path is kept; later ones get `.1`, `.2`, ...
/// appended, skipping names that were already handed out.
#[derive(Debug, Default)]
pub struct UniqueNames {
    issued: RefCell<HashSet<String>>,
}

impl UniqueNames {
    /// Create a tracker with no names issued yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PathRemapper for UniqueNames {
    fn remap(&self, path: &str) -> Result<Option<String>> {
        let mut issued = self.issued.borrow_mut();

        let mut candidate = path.to_string();
        let mut counter = 0;
        while issued.contains(&candidate) {
            counter += 1;
            candidate = format!("{path}.{counter}");
        }

        if counter > 0 {
            tracing::debug!(path = %path, renamed = %candidate, "Destination already used, renaming");
        }
        issued.insert(candidate.clone());
        Ok(Some(candidate))
    }
}

/// Apply remappers in order. The first skip ends the chain.
#[derive(Default)]
pub struct RemapChain {
    remappers: Vec<Box<dyn PathRemapper>>,
}

impl RemapChain {
    /// Create an empty chain. An empty chain passes paths through unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a remapper.
    #[must_use]
    pub fn with(mut self, remapper: impl PathRemapper + 'static) -> Self {
        self.remappers.push(Box::new(remapper));
        self
    }

    /// Number of remappers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remappers.len()
    }

    /// Whether the chain has no remappers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remappers.is_empty()
    }
}

impl PathRemapper for RemapChain {
    fn remap(&self, path: &str) -> Result<Option<String>> {
        let mut current = path.to_string();
        for remapper in &self.remappers {
            match remapper.remap(&current)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}
