//! Section registry and streaming parser.
//!
//! Handlers are registered per section kind. The parser reads a report,
//! recognises section markers and feeds each section body into the sinks
//! returned by the handlers registered for that kind.

mod core;
mod engine;
mod handler;
mod types;

pub use self::core::SectionRegistry;
pub use engine::SectionParser;
pub use handler::{HandlerOutcome, SectionHandler, SectionSink};
pub use types::ParseStats;
