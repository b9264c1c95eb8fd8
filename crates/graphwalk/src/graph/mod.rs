//! Waypoint graph model (the only passive data structure in the engine).
//!
//! Purpose
//! - Hold vertices (label, lat/lon, visibility) and undirected edges with
//!   per-vertex incident-edge lists, immutable once loaded.
//! - Validate edge endpoints up front so the drivers never see a dangling
//!   index.
//!
//! Code cross-refs: `Frontier` entries reference edges by `EdgeId`; the
//! drivers read adjacency through `Graph::adjacent_of`.

pub mod rand;
mod types;

pub use types::{Edge, EdgeId, Graph, GraphError, Vertex, VertexId};
