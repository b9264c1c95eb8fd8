//! Data types for the waypoint graph.
//!
//! Kept small and explicit to make the algorithm drivers easy to read.

use std::fmt;

use nalgebra::Vector2;

use crate::geo;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// A named waypoint with decimal-degree coordinates.
///
/// Coordinates are rounded to 6 fractional digits at construction, matching
/// the dataset precision. A label containing `'+'` marks a hidden shaping
/// point rather than a visible waypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub visible: bool,
}

impl Vertex {
    pub fn new(label: impl Into<String>, lat: f64, lon: f64) -> Self {
        let label = label.into();
        let visible = !label.contains('+');
        Self {
            label,
            lat: round6(lat),
            lon: round6(lon),
            visible,
        }
    }

    /// Position as (x, y) = (lon, lat), the plane the hull scan works in.
    #[inline]
    pub fn coords(&self) -> Vector2<f64> {
        Vector2::new(self.lon, self.lat)
    }
}

#[inline]
fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

/// An undirected connection between two vertices.
///
/// The (v1, v2) order carries no meaning but is preserved as given. `via`
/// holds intermediate shaping coordinates for non-straight rendering and is
/// ignored by every algorithm.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub v1: VertexId,
    pub v2: VertexId,
    pub label: String,
    pub via: Vec<(f64, f64)>,
}

impl Edge {
    pub fn new(v1: usize, v2: usize, label: impl Into<String>) -> Self {
        Self {
            v1: VertexId(v1),
            v2: VertexId(v2),
            label: label.into(),
            via: Vec::new(),
        }
    }

    /// The endpoint opposite `v`. `v` must be one of the endpoints.
    #[inline]
    pub fn other_endpoint(&self, v: VertexId) -> VertexId {
        if self.v1 == v {
            self.v2
        } else {
            self.v1
        }
    }

    /// Number of concurrent routes named by the label (comma-separated).
    pub fn concurrent_routes(&self) -> usize {
        self.label.split(',').count()
    }
}

/// Error raised by [`Graph::load`] for malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    EdgeEndpointOutOfRange {
        edge: usize,
        endpoint: usize,
        num_vertices: usize,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeEndpointOutOfRange {
                edge,
                endpoint,
                num_vertices,
            } => write!(
                f,
                "invalid graph: edge {edge} references vertex {endpoint} \
                 (graph has {num_vertices} vertices)"
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// Immutable waypoint graph with per-vertex incident-edge lists.
///
/// Adjacency lists hold edge ids in edge-insertion order, so neighbor
/// enumeration is deterministic and matches the order edges were given.
#[derive(Clone, Debug)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    adj: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Validate the edge list and build adjacency. The graph is immutable
    /// afterwards.
    pub fn load(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let n = vertices.len();
        let mut adj: Vec<Vec<EdgeId>> = vec![Vec::new(); n];
        for (i, edge) in edges.iter().enumerate() {
            for endpoint in [edge.v1, edge.v2] {
                if endpoint.0 >= n {
                    return Err(GraphError::EdgeEndpointOutOfRange {
                        edge: i,
                        endpoint: endpoint.0,
                        num_vertices: n,
                    });
                }
            }
            adj[edge.v1.0].push(EdgeId(i));
            if edge.v2 != edge.v1 {
                adj[edge.v2.0].push(EdgeId(i));
            }
        }
        Ok(Self {
            vertices,
            edges,
            adj,
        })
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.0 < self.vertices.len()
    }

    #[inline]
    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }

    #[inline]
    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.0]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbors of `v` as (neighbor, edge) pairs in incident-edge order.
    pub fn adjacent_of(&self, v: VertexId) -> Vec<(VertexId, EdgeId)> {
        self.adj[v.0]
            .iter()
            .map(|&e| (self.edges[e.0].other_endpoint(v), e))
            .collect()
    }

    /// Straight great-circle distance between two vertices, in miles.
    pub fn distance_miles(&self, a: VertexId, b: VertexId) -> f64 {
        let (va, vb) = (self.vertex(a), self.vertex(b));
        geo::great_circle_miles(va.lat, va.lon, vb.lat, vb.lon)
    }

    /// Endpoint-to-endpoint length of an edge in feet (via points ignored).
    pub fn edge_feet(&self, e: EdgeId) -> f64 {
        let edge = self.edge(e);
        let (va, vb) = (self.vertex(edge.v1), self.vertex(edge.v2));
        geo::great_circle_feet(va.lat, va.lon, vb.lat, vb.lon)
    }
}
