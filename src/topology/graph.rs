//! Mutable overlay topology graph.
//!
//! The graph is undirected by construction: every logical link is stored as
//! two mirrored neighbor-set entries, and OPEN/CLOSE always touch both sides.
//! Vertices are never deleted once seen; closing the last edge of a vertex
//! leaves it in place as an isolated vertex.

use std::collections::{BTreeMap, BTreeSet};

/// Well-known seed endpoints that are present in every graph, even before
/// any event has been applied.
pub const BOOTSTRAP_NODES: [&str; 2] = ["localhost:8002", "localhost:8004"];

/// Errors raised by graph queries
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("vertex not found: {0}")]
    NotFound(String),
}

/// The current overlay topology: node identifier -> neighbor set.
///
/// Invariants:
/// - symmetry: `b` is a neighbor of `a` iff `a` is a neighbor of `b`
/// - the two bootstrap vertices always exist
/// - vertices are never removed, only edges
///
/// Ordered containers keep vertex and neighbor iteration deterministic for
/// rendering and statistics output.
#[derive(Debug, Clone)]
pub struct TopologyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl Default for TopologyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyGraph {
    /// Create a graph seeded with the bootstrap vertices and no edges.
    pub fn new() -> Self {
        let mut adjacency = BTreeMap::new();
        for node in BOOTSTRAP_NODES {
            adjacency.insert(node.to_string(), BTreeSet::new());
        }
        Self { adjacency }
    }

    /// Insert `id` with an empty neighbor set if absent. Idempotent.
    pub fn ensure_vertex(&mut self, id: &str) {
        if !self.adjacency.contains_key(id) {
            self.adjacency.insert(id.to_string(), BTreeSet::new());
        }
    }

    /// Connect `a` and `b`. Both vertices must already be present; callers
    /// are expected to `ensure_vertex` both endpoints first. Idempotent if
    /// the edge already exists (presence-only, no multi-edge counting).
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        if !self.adjacency.contains_key(a) {
            return Err(GraphError::NotFound(a.to_string()));
        }
        if !self.adjacency.contains_key(b) {
            return Err(GraphError::NotFound(b.to_string()));
        }

        // Both lookups verified above; insert the two directed entries.
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.insert(b.to_string());
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.insert(a.to_string());
        }
        Ok(())
    }

    /// Disconnect `a` and `b`. A no-op when the edge (or either vertex) does
    /// not exist: CLOSE on an already-closed connection must not fail.
    pub fn remove_edge(&mut self, a: &str, b: &str) {
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.remove(b);
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.remove(a);
        }
    }

    /// Whether `id` is currently a vertex of the graph.
    pub fn contains_vertex(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Number of neighbors of `id`.
    pub fn degree(&self, id: &str) -> Result<usize, GraphError> {
        self.adjacency
            .get(id)
            .map(|neighbors| neighbors.len())
            .ok_or_else(|| GraphError::NotFound(id.to_string()))
    }

    /// The (possibly empty) neighbor set of `id`.
    pub fn neighbors(&self, id: &str) -> Result<&BTreeSet<String>, GraphError> {
        self.adjacency
            .get(id)
            .ok_or_else(|| GraphError::NotFound(id.to_string()))
    }

    /// All vertex identifiers, in sorted order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(|id| id.as_str())
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of logical undirected edges (each counted once).
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.adjacency.values().map(|n| n.len()).sum();
        directed / 2
    }

    /// Each logical edge once, as an ordered pair `(a, b)` with `a < b`.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::new();
        for (id, neighbors) in &self.adjacency {
            for neighbor in neighbors {
                if id.as_str() < neighbor.as_str() {
                    edges.push((id.as_str(), neighbor.as_str()));
                }
            }
        }
        edges
    }
}
