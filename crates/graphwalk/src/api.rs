//! Curated internal API surface (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for
//!   project-internal code. Breaking changes are allowed and expected.
//! - Prefer these re-exports for clarity and consistency across callers.

// Graph model
pub use crate::graph::{Edge, EdgeId, Graph, GraphError, Vertex, VertexId};
// Random graphs
pub use crate::graph::rand::{draw_graph, RandomGraphCfg, ReplayToken, VertexCount};
// Distances
pub use crate::geo::{great_circle_feet, great_circle_miles};
// Frontier disciplines
pub use crate::frontier::{Discipline, EmptyFrontier, Frontier, FrontierEntry};
// Step contract and scheduling
pub use crate::engine::{
    Algorithm, Driver, EdgeLeaderKind, EdgeLeaders, EdgeRole, PopRecord, RunContext, RunSummary,
    Scheduler, StartError, StepError, StepEvent, StepResult, Tick, VertexLeaderKind,
    VertexLeaders, VertexRole, VisitState,
};
// Algorithm drivers
pub use crate::drivers::{
    start, ConnectedComponentsDriver, ConvexHullDriver, ExtremeEdgeScanDriver,
    ExtremeVertexScanDriver, ShortestPathDriver, TraversalDriver,
};
