//! Vertex classification for rendering.
//!
//! Classification is a presentation hint derived from a vertex identifier and
//! its current neighborhood; it never mutates the graph.

use super::graph::{GraphError, TopologyGraph};

/// Identifier marker for bootstrap vertices.
const BOOTSTRAP_MARKER: &str = "localhost";
/// Neighbor marker placing a vertex in group A.
const GROUP_A_MARKER: &str = "8002";
/// Neighbor marker placing a vertex in group B.
const GROUP_B_MARKER: &str = "8004";

/// Display category of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexClass {
    /// One of the well-known seed endpoints.
    Bootstrap,
    /// Adjacent to the bootstrap-8002 endpoint.
    GroupA,
    /// Adjacent to the bootstrap-8004 endpoint.
    GroupB,
    /// No bootstrap adjacency.
    Unclassified,
}

/// Classify a vertex by its identity and its neighbors' identities.
///
/// A vertex adjacent to both bootstrap nodes is classified `GroupA`: group A
/// takes precedence over group B on dual adjacency, so classification does
/// not depend on neighbor iteration order.
pub fn classify(graph: &TopologyGraph, id: &str) -> Result<VertexClass, GraphError> {
    if id.contains(BOOTSTRAP_MARKER) {
        return Ok(VertexClass::Bootstrap);
    }

    let neighbors = graph.neighbors(id)?;
    if neighbors.iter().any(|n| n.contains(GROUP_A_MARKER)) {
        return Ok(VertexClass::GroupA);
    }
    if neighbors.iter().any(|n| n.contains(GROUP_B_MARKER)) {
        return Ok(VertexClass::GroupB);
    }
    Ok(VertexClass::Unclassified)
}
