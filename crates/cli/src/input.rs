//! Graph JSON loading. All file parsing lives here; the engine core only
//! ever sees a materialized [`Graph`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use graphwalk::graph::{Edge, Graph, Vertex, VertexId};

#[derive(Deserialize)]
struct GraphFile {
    vertices: Vec<VertexSpec>,
    edges: Vec<EdgeSpec>,
}

#[derive(Deserialize)]
struct VertexSpec {
    label: String,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct EdgeSpec {
    v1: usize,
    v2: usize,
    #[serde(default)]
    label: String,
    #[serde(default)]
    via: Vec<(f64, f64)>,
}

/// Read `{ "vertices": [...], "edges": [...] }` from `path`.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let file: GraphFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;
    let vertices = file
        .vertices
        .into_iter()
        .map(|v| Vertex::new(v.label, v.lat, v.lon))
        .collect();
    let edges = file
        .edges
        .into_iter()
        .map(|e| {
            let mut edge = Edge::new(e.v1, e.v2, e.label);
            edge.via = e.via;
            edge
        })
        .collect();
    Graph::load(vertices, edges).with_context(|| format!("validating {}", path.display()))
}

/// Human-readable vertex name for logs: "3 (Albany)".
pub fn describe_vertex(graph: &Graph, v: VertexId) -> String {
    format!("{} ({})", v.0, graph.vertex(v).label)
}
