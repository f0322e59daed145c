//! Types for the section parser.

use super::handler::SectionSink;

/// Parser state between two lines of input.
pub(crate) enum ParseState {
    /// No marker seen yet; preamble lines are discarded.
    AwaitingSection,
    /// Inside a section body.
    InSection(ActiveSection),
}

/// The section currently being streamed.
pub(crate) struct ActiveSection {
    /// Kind captured from the marker.
    pub kind: String,

    /// Whether the header line has been consumed.
    pub header_seen: bool,

    /// Sinks produced by the handlers, in registration order.
    pub sinks: Vec<Box<dyn SectionSink>>,
}

impl ActiveSection {
    pub(crate) fn new(kind: String) -> Self {
        Self {
            kind,
            header_seen: false,
            sinks: Vec::new(),
        }
    }
}

/// Counters collected during a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Section markers recognised.
    pub sections: usize,

    /// Sections that received at least one sink.
    pub handled_sections: usize,

    /// Handler invocations that opted out with a skip.
    pub skipped: usize,

    /// Body lines forwarded to at least one sink.
    pub body_lines: usize,
}
