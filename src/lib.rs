//! # Overlayvis - Overlay network topology reconstruction from connection logs
//!
//! This library rebuilds the evolving topology of an overlay network from a
//! textual event log of connection OPEN/CLOSE records, replays it either
//! instantaneously or paced by the original inter-event timing, and reports
//! structural statistics about the resulting graph.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `parser`: log line retention, ordering, and event classification
//! - `topology`: the mutable topology graph and per-vertex classification
//! - `replay`: event replay in final (immediate) or interval (paced) mode
//! - `stats`: vertex/edge counts and the degree histogram
//! - `render`: the renderer contract and GraphViz DOT output
//! - `config`: pacing policy configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use overlayvis::config::PacingConfig;
//! use overlayvis::parser::read_retained_lines;
//! use overlayvis::render::NullRenderer;
//! use overlayvis::replay::{ReplayEngine, ReplayMode};
//! use overlayvis::stats::compute_stats;
//!
//! let lines = read_retained_lines(std::path::Path::new("overlay.txt"))?;
//! let mut engine = ReplayEngine::new(PacingConfig::default());
//! engine.run(&lines, ReplayMode::Final, &mut NullRenderer);
//! let stats = compute_stats(engine.graph());
//! println!("{} vertices, {} edges", stats.vertex_count, stats.edge_count);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Graph queries and event classification use typed errors (`thiserror`);
//! file-level operations return `color_eyre` results with context. Malformed
//! event lines never abort a replay - they are logged and skipped.

pub mod config;
pub mod parser;
pub mod render;
pub mod replay;
pub mod stats;
pub mod topology;
