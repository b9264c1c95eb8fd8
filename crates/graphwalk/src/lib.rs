//! Incremental graph-algorithm execution engine.
//!
//! Steps classic graph and geometric algorithms one discrete move at a time
//! — breadth/depth/random-first traversal, Dijkstra shortest path,
//! connected components, extreme-vertex/edge scans, brute-force convex hull
//! — over a waypoint graph, emitting `StepEvent`s an external renderer can
//! consume. Rendering, persistence, and file parsing live outside this
//! crate; the engine assumes a materialized [`graph::Graph`].
//!
//! Layering, leaves first: `geo` and `graph` are passive; `frontier` holds
//! the pluggable pop discipline; `engine` defines the step contract and the
//! cooperative scheduler; `drivers` holds one state machine per algorithm.

pub mod api;
pub mod drivers;
pub mod engine;
pub mod frontier;
pub mod geo;
pub mod graph;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use graph::{EdgeId, VertexId};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::drivers::start;
    pub use crate::engine::{
        Algorithm, Driver, RunContext, Scheduler, StartError, StepError, StepEvent, StepResult,
        Tick,
    };
    pub use crate::frontier::Discipline;
    pub use crate::graph::{Edge, EdgeId, Graph, Vertex, VertexId};
}
