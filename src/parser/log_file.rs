//! Event log loading.
//!
//! The whole file is read and ordered before replay begins; there is no
//! streaming ingestion. Retained lines are deduplicated and sorted by full
//! lexicographic order: log lines start with an equal-width numeric
//! timestamp, so lexicographic order approximates chronological order for
//! the expected input shape. This is a deliberate simplification, not a
//! general-purpose log sorter.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::event::is_retained;

/// Read the log at `path` and return the retained lines, deduplicated and
/// sorted. Fails only when the file itself is unavailable; malformed lines
/// are detected later when they are applied.
pub fn read_retained_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let reader = BufReader::with_capacity(64 * 1024, file);

    // BTreeSet collapses duplicate lines and yields lexicographic order.
    let mut retained: BTreeSet<String> = BTreeSet::new();
    for line_result in reader.lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(_) => continue, // Skip undecodable lines
        };
        if is_retained(&line) {
            retained.insert(line);
        }
    }

    log::info!("Retained {} event lines from {}", retained.len(), path.display());

    Ok(retained.into_iter().collect())
}
