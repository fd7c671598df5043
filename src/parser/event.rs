//! Event line classification.
//!
//! A retained log line is classified exactly once into a tagged variant
//! instead of being re-probed with substring tests at every use site.
//! Retained line grammar:
//!
//! ```text
//! [<timestamp>] [Overlay] OPEN|CLOSE <endpointA> <connector> <endpointB> [trailing ignored]
//! ```
//!
//! `<timestamp>` is a decimal integer in milliseconds, captured before the
//! optional single-level `Overlay` wrapper token is stripped. The connector
//! token (an arrow in practice) is ignored, as is anything after the second
//! endpoint.

use std::sync::LazyLock;

use regex::Regex;

/// Match: "[TIMESTAMP] [Overlay] OPEN|CLOSE A CONNECTOR B"
static EVENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(\d+)\s+)?(?:Overlay\s+)?(OPEN|CLOSE)\s+(\S+)\s+\S+\s+(\S+)")
        .expect("Invalid event line regex")
});

/// Errors raised while turning a retained line into an applied event
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("malformed event line: {0:?}")]
    Malformed(String),
    #[error("event line has no parseable timestamp for paced replay: {0:?}")]
    MissingTimestamp(String),
}

/// Kind of a connection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Open,
    Close,
}

/// One parsed OPEN/CLOSE record. Created once by the parser and consumed
/// exactly once by the replay engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub endpoint_a: String,
    pub endpoint_b: String,
    /// Leading timestamp in milliseconds; required for paced replay only.
    pub timestamp: Option<u64>,
}

/// Classification of a raw log line, decided once per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// No OPEN/CLOSE marker; dropped at retention.
    Ignored,
    /// A well-formed connection event.
    Event(Event),
    /// Contains a marker but does not split into the expected token shape.
    Malformed,
}

/// Whether a raw line is retained at all. Lines without a marker are
/// ignored entirely (headers, comments, unrelated telemetry).
pub fn is_retained(line: &str) -> bool {
    line.contains("OPEN") || line.contains("CLOSE")
}

/// Classify a raw log line.
///
/// Malformation is tolerated here by design: a retained line that does not
/// match the grammar becomes `Malformed` and the replay engine logs and
/// skips it rather than aborting.
pub fn classify_line(line: &str) -> LineClass {
    if !is_retained(line) {
        return LineClass::Ignored;
    }

    let Some(caps) = EVENT_LINE.captures(line) else {
        return LineClass::Malformed;
    };

    let timestamp = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
    let kind = match caps.get(2).map(|m| m.as_str()) {
        Some("OPEN") => EventKind::Open,
        Some("CLOSE") => EventKind::Close,
        _ => return LineClass::Malformed,
    };
    let endpoint_a = caps.get(3).map(|m| m.as_str().to_string());
    let endpoint_b = caps.get(4).map(|m| m.as_str().to_string());

    match (endpoint_a, endpoint_b) {
        (Some(endpoint_a), Some(endpoint_b)) => LineClass::Event(Event {
            kind,
            endpoint_a,
            endpoint_b,
            timestamp,
        }),
        _ => LineClass::Malformed,
    }
}
