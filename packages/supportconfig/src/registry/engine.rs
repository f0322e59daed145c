//! Section parser that streams a report and dispatches sections to handlers.

use std::io::BufRead;

use super::core::SectionRegistry;
use super::handler::HandlerOutcome;
use super::types::{ActiveSection, ParseState, ParseStats};
use crate::config::parse_marker;
use crate::error::{Result, SplitError};

/// Streaming parser for supportconfig reports.
///
/// The parser walks the input line by line. Each section marker starts a
/// new section; the first line after it is the header handed to every
/// handler registered for the section kind, and the remaining lines are
/// written into the sinks those handlers returned.
pub struct SectionParser<'h> {
    registry: SectionRegistry<'h>,
}

impl<'h> SectionParser<'h> {
    /// Create a new parser with the given registry.
    #[must_use]
    pub fn new(registry: SectionRegistry<'h>) -> Self {
        Self { registry }
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &SectionRegistry<'h> {
        &self.registry
    }

    /// Parse a report to completion.
    ///
    /// # Arguments
    /// * `source` - The report, read line by line
    ///
    /// # Returns
    /// `ParseStats` with section and line counters
    ///
    /// # Errors
    /// Returns the first handler error, read error, or sink write error.
    /// Sinks of earlier sections have already been closed at that point.
    pub fn parse(&self, mut source: impl BufRead) -> Result<ParseStats> {
        let mut stats = ParseStats::default();
        let mut state = ParseState::AwaitingSection;

        let lines = match self.run(&mut source, &mut state, &mut stats) {
            Ok(lines) => lines,
            Err(err) => {
                discard_section(state);
                return Err(err);
            }
        };

        close_section(state)?;

        tracing::debug!(
            lines,
            sections = stats.sections,
            handled = stats.handled_sections,
            "Finished parsing report"
        );
        Ok(stats)
    }

    /// Feed every line of the source through the state machine.
    ///
    /// Returns the number of lines read.
    fn run(
        &self,
        source: &mut impl BufRead,
        state: &mut ParseState,
        stats: &mut ParseStats,
    ) -> Result<usize> {
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = source
                .read_until(b'\n', &mut buf)
                .map_err(|source| SplitError::Read {
                    line: line_no + 1,
                    source,
                })?;
            if read == 0 {
                return Ok(line_no);
            }
            line_no += 1;

            self.step(state, trim_line_ending(&buf), stats)?;
        }
    }

    /// Advance the state machine by one line.
    fn step(&self, state: &mut ParseState, line: &[u8], stats: &mut ParseStats) -> Result<()> {
        if let Some(kind) = parse_marker(line) {
            stats.sections += 1;
            tracing::debug!(kind = %kind, "Section started");
            let previous =
                std::mem::replace(state, ParseState::InSection(ActiveSection::new(kind)));
            return close_section(previous);
        }

        match state {
            ParseState::AwaitingSection => Ok(()),
            ParseState::InSection(section) if section.header_seen => {
                write_body_line(section, line, stats)
            }
            ParseState::InSection(section) => {
                section.header_seen = true;
                self.open_sinks(section, line, stats)
            }
        }
    }

    /// Run every handler for the section kind against the header line.
    fn open_sinks(
        &self,
        section: &mut ActiveSection,
        line: &[u8],
        stats: &mut ParseStats,
    ) -> Result<()> {
        let header = String::from_utf8_lossy(line);

        for handler in self.registry.handlers_for(&section.kind) {
            match handler.handle(&section.kind, &header)? {
                HandlerOutcome::Sink(sink) => section.sinks.push(sink),
                HandlerOutcome::Skip => {
                    stats.skipped += 1;
                    tracing::trace!(kind = %section.kind, header = %header, "Handler skipped section");
                }
            }
        }

        if !section.sinks.is_empty() {
            stats.handled_sections += 1;
        }
        Ok(())
    }
}

/// Write one body line, terminated by `\n`, to every sink of the section.
fn write_body_line(section: &mut ActiveSection, line: &[u8], stats: &mut ParseStats) -> Result<()> {
    if section.sinks.is_empty() {
        return Ok(());
    }

    for sink in &mut section.sinks {
        sink.write_all(line)
            .and_then(|()| sink.write_all(b"\n"))
            .map_err(|source| SplitError::Write {
                kind: section.kind.clone(),
                source,
            })?;
    }
    stats.body_lines += 1;
    Ok(())
}

/// Close the sinks of the active section, in registration order.
///
/// Every sink is closed even if an earlier one fails; the first failure is
/// returned.
fn close_section(state: ParseState) -> Result<()> {
    let ParseState::InSection(section) = state else {
        return Ok(());
    };

    let count = section.sinks.len();
    let mut first_error = None;
    for sink in section.sinks {
        if let Err(source) = sink.close() {
            first_error.get_or_insert(SplitError::Write {
                kind: section.kind.clone(),
                source,
            });
        }
    }
    if count > 0 {
        tracing::debug!(kind = %section.kind, sinks = count, "Section closed");
    }
    first_error.map_or(Ok(()), Err)
}

/// Close the sinks of a section abandoned by an error.
fn discard_section(state: ParseState) {
    if let ParseState::InSection(section) = &state {
        if !section.sinks.is_empty() {
            tracing::debug!(kind = %section.kind, "Closing sinks after parse error");
        }
    }
    if let Err(err) = close_section(state) {
        tracing::warn!(error = %err, "Failed to close sink after parse error");
    }
}

/// Strip the `\n` terminator and a preceding `\r`, if present.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
