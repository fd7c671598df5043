//! Structural statistics over the final topology graph.
//!
//! Everything here is derived in one full pass over the graph after replay
//! completes; nothing is maintained incrementally during replay.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::topology::TopologyGraph;

/// Statistical summary of vertex degrees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeSummary {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Structural statistics of a topology snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// Degree -> count of vertices currently having that degree
    pub degree_histogram: BTreeMap<usize, usize>,
    pub degree_summary: DegreeSummary,
    /// Vertices with no current connections
    pub isolated_vertices: Vec<String>,
}

/// Compute statistics from the current graph state.
pub fn compute_stats(graph: &TopologyGraph) -> TopologyStats {
    let mut degree_histogram: BTreeMap<usize, usize> = BTreeMap::new();
    let mut degrees: Vec<usize> = Vec::new();
    let mut isolated_vertices: Vec<String> = Vec::new();

    for vertex in graph.vertices() {
        // Every iterated vertex exists, so the query cannot fail.
        let degree = graph.degree(vertex).unwrap_or(0);
        *degree_histogram.entry(degree).or_insert(0) += 1;
        degrees.push(degree);
        if degree == 0 {
            isolated_vertices.push(vertex.to_string());
        }
    }

    let degree_summary = if degrees.is_empty() {
        DegreeSummary {
            min: 0,
            max: 0,
            mean: 0.0,
        }
    } else {
        DegreeSummary {
            min: *degrees.iter().min().unwrap_or(&0),
            max: *degrees.iter().max().unwrap_or(&0),
            mean: degrees.iter().sum::<usize>() as f64 / degrees.len() as f64,
        }
    };

    TopologyStats {
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        degree_histogram,
        degree_summary,
        isolated_vertices,
    }
}

/// Print a human-readable summary to stdout.
pub fn print_summary(stats: &TopologyStats) {
    println!("Vertices: {}", stats.vertex_count);
    println!("Edges: {}", stats.edge_count);
    for (degree, count) in &stats.degree_histogram {
        println!("Degree: {}: {}", degree, count);
    }
    println!(
        "Degree min/max/mean: {}/{}/{:.2}",
        stats.degree_summary.min, stats.degree_summary.max, stats.degree_summary.mean
    );
    if !stats.isolated_vertices.is_empty() {
        println!("Isolated vertices: {}", stats.isolated_vertices.join(", "));
    }
}

/// Write the statistics as a pretty-printed JSON report.
pub fn write_json_report(stats: &TopologyStats, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)
        .context("Failed to serialize topology stats to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_on_seeded_graph() {
        let stats = compute_stats(&TopologyGraph::new());
        assert_eq!(stats.vertex_count, 2);
        assert_eq!(stats.edge_count, 0);
        assert_eq!(stats.degree_histogram.get(&0), Some(&2));
        assert_eq!(stats.isolated_vertices.len(), 2);
    }

    #[test]
    fn test_degree_histogram() {
        let mut graph = TopologyGraph::new();
        graph.ensure_vertex("a");
        graph.ensure_vertex("b");
        graph.ensure_vertex("c");
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("a", "c").unwrap();

        let stats = compute_stats(&graph);
        // Two bootstrap vertices at degree 0, b and c at 1, a at 2.
        assert_eq!(stats.degree_histogram.get(&0), Some(&2));
        assert_eq!(stats.degree_histogram.get(&1), Some(&2));
        assert_eq!(stats.degree_histogram.get(&2), Some(&1));
        assert_eq!(stats.vertex_count, 5);
        assert_eq!(stats.edge_count, 2);
    }

    #[test]
    fn test_degree_summary() {
        let mut graph = TopologyGraph::new();
        graph.ensure_vertex("a");
        graph.ensure_vertex("b");
        graph.add_edge("a", "b").unwrap();

        let stats = compute_stats(&graph);
        assert_eq!(stats.degree_summary.min, 0);
        assert_eq!(stats.degree_summary.max, 1);
        assert!((stats.degree_summary.mean - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_json_report_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let stats = compute_stats(&TopologyGraph::new());
        write_json_report(&stats, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: TopologyStats = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.vertex_count, 2);
    }
}
