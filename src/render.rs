//! Graph rendering.
//!
//! The replay engine owns the topology graph exclusively; renderers hold no
//! graph state of their own. After each mutation in paced mode the engine
//! calls `refresh` and the renderer re-reads whatever it needs from the
//! graph (pull model, no buffered change queue). Immediate mode refreshes
//! once, after replay completes.

use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::topology::{classify, TopologyGraph, VertexClass};

/// Layout algorithm selection. Opaque to the core model; it only influences
/// the layout hint embedded in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutChoice {
    /// Circular layout
    Circle,
    /// Self-organizing map layout
    Isom,
    /// Kamada-Kawai layout
    Kk,
}

impl LayoutChoice {
    /// GraphViz layout engine approximating the selected algorithm.
    pub fn engine(&self) -> &'static str {
        match self {
            LayoutChoice::Circle => "circo",
            LayoutChoice::Isom => "fdp",
            LayoutChoice::Kk => "neato",
        }
    }
}

/// Consumer of graph state, notified after mutations.
pub trait Renderer {
    /// Called with the current graph; the renderer queries state on its own.
    fn refresh(&mut self, graph: &TopologyGraph);
}

/// Renderer that discards every refresh. Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn refresh(&mut self, _graph: &TopologyGraph) {}
}

/// Renderer that rewrites a GraphViz DOT file on every refresh.
#[derive(Debug)]
pub struct DotRenderer {
    path: PathBuf,
    layout: LayoutChoice,
}

impl DotRenderer {
    pub fn new(path: PathBuf, layout: LayoutChoice) -> Self {
        Self { path, layout }
    }
}

impl Renderer for DotRenderer {
    fn refresh(&mut self, graph: &TopologyGraph) {
        let dot = to_dot(graph, self.layout);
        if let Err(e) = fs::write(&self.path, dot) {
            // Rendering failures never abort the replay.
            log::error!("Failed to write DOT output to {}: {}", self.path.display(), e);
        }
    }
}

/// Fill color for a vertex class, matching the original viewer's palette.
fn fill_color(class: VertexClass) -> &'static str {
    match class {
        VertexClass::Bootstrap => "red",
        VertexClass::GroupA => "blue",
        VertexClass::GroupB => "orange",
        VertexClass::Unclassified => "green",
    }
}

/// Render the current graph as GraphViz DOT with classification colors.
pub fn to_dot(graph: &TopologyGraph, layout: LayoutChoice) -> String {
    let mut dot = String::new();
    dot.push_str("graph Overlay {\n");
    dot.push_str(&format!("    layout={};\n", layout.engine()));
    dot.push_str("    node [shape=circle];\n\n");

    for vertex in graph.vertices() {
        let class = classify(graph, vertex).unwrap_or(VertexClass::Unclassified);
        dot.push_str(&format!(
            "    \"{}\" [fillcolor={}, style=filled];\n",
            vertex,
            fill_color(class)
        ));
    }

    dot.push('\n');

    for (a, b) in graph.edges() {
        dot.push_str(&format!("    \"{}\" -- \"{}\";\n", a, b));
    }

    dot.push_str("}\n");
    dot
}
