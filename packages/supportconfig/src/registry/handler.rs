//! Section handler trait and the sinks handlers hand back.

use std::io::{self, Write};

use crate::error::Result;

/// Write destination for the body of one section.
///
/// A sink lives for exactly one section. The parser calls [`close`] when the
/// next marker is found or the input ends, and never touches the sink again.
///
/// [`close`]: SectionSink::close
pub trait SectionSink: Write {
    /// Flush buffered output and release the underlying resource.
    fn close(mut self: Box<Self>) -> io::Result<()> {
        self.flush()
    }
}

impl SectionSink for Vec<u8> {}

impl SectionSink for io::Sink {}

/// What a handler decided to do with a section.
pub enum HandlerOutcome {
    /// Stream the section body into this sink.
    Sink(Box<dyn SectionSink>),
    /// Sit this section out. Not an error.
    Skip,
}

impl HandlerOutcome {
    /// Wrap a sink.
    #[must_use]
    pub fn sink(sink: impl SectionSink + 'static) -> Self {
        Self::Sink(Box::new(sink))
    }

    /// Whether the handler opted out.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

impl std::fmt::Debug for HandlerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sink(_) => f.write_str("Sink(..)"),
            Self::Skip => f.write_str("Skip"),
        }
    }
}

/// Trait for section handlers.
///
/// A handler is invoked once per section of the kind it is registered for,
/// with the section kind and the header line. Returning an error aborts the
/// whole parse.
pub trait SectionHandler {
    /// Decide how to consume a section.
    ///
    /// # Arguments
    /// * `kind` - Section kind captured from the marker
    /// * `header` - First line of the section body
    fn handle(&self, kind: &str, header: &str) -> Result<HandlerOutcome>;
}

impl<F> SectionHandler for F
where
    F: Fn(&str, &str) -> Result<HandlerOutcome>,
{
    fn handle(&self, kind: &str, header: &str) -> Result<HandlerOutcome> {
        self(kind, header)
    }
}
