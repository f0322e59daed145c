//! Section registry for mapping section kinds to handlers.

use std::collections::HashMap;

use super::handler::SectionHandler;

/// Registry mapping section kinds to an ordered list of handlers.
///
/// Several handlers may be registered for the same kind. They are invoked
/// in registration order and each produces its own sink.
pub struct SectionRegistry<'h> {
    handlers: HashMap<String, Vec<Box<dyn SectionHandler + 'h>>>,
}

impl<'h> SectionRegistry<'h> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Append a handler to the list for a section kind.
    pub fn register(&mut self, kind: impl Into<String>, handler: impl SectionHandler + 'h) {
        self.handlers
            .entry(kind.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Handlers for a kind, in registration order. Empty if none.
    #[must_use]
    pub fn handlers_for(&self, kind: &str) -> &[Box<dyn SectionHandler + 'h>] {
        self.handlers.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check if at least one handler is registered for a kind.
    #[must_use]
    pub fn has_handler(&self, kind: &str) -> bool {
        !self.handlers_for(kind).is_empty()
    }

    /// All kinds with handlers, sorted.
    #[must_use]
    pub fn registered_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Total number of registered handlers across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Whether no handler is registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SectionRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
