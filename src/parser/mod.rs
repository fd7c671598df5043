//! Event log parsing.
//!
//! Turns a raw overlay log into an ordered, deduplicated sequence of
//! retained lines and classifies each retained line into a tagged event
//! variant for the replay engine.

pub mod event;
pub mod log_file;

pub use event::{classify_line, Event, EventError, EventKind, LineClass};
pub use log_file::read_retained_lines;
