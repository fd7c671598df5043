//! Overlay topology module.
//!
//! This module contains the mutable topology graph reconstructed from
//! connection events and the per-vertex display classification.

pub mod classify;
pub mod graph;

// Re-export key types and functions for easier access
pub use classify::{classify, VertexClass};
pub use graph::{GraphError, TopologyGraph, BOOTSTRAP_NODES};
