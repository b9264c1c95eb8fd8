//! Algorithm drivers: one cooperative state machine per algorithm.
//!
//! Purpose
//! - Each driver consumes the graph, a frontier, and a visitation state, and
//!   turns one `step` call into a batch of `StepEvent`s. Nothing here ever
//!   touches a rendering surface.
//! - `start` dispatches a validated `RunContext` to the right driver and
//!   returns it together with the initial events (the bulk "undiscovered"
//!   reset plus the start-vertex classification).

mod components;
mod extreme_edge;
mod extreme_vertex;
mod hull;
mod shortest_path;
mod traversal;

pub use components::ConnectedComponentsDriver;
pub use extreme_edge::ExtremeEdgeScanDriver;
pub use extreme_vertex::ExtremeVertexScanDriver;
pub use hull::ConvexHullDriver;
pub use shortest_path::ShortestPathDriver;
pub use traversal::TraversalDriver;

use crate::engine::{
    Algorithm, Driver, EdgeRole, RunContext, StartError, StepEvent, VertexRole,
};
use crate::frontier::{Discipline, Frontier};
use crate::graph::{EdgeId, Graph, VertexId};

/// Build and start the driver selected by `ctx.algorithm`.
pub fn start<'g>(
    graph: &'g Graph,
    ctx: &RunContext,
) -> Result<(Box<dyn Driver + 'g>, Vec<StepEvent>), StartError> {
    match ctx.algorithm {
        Algorithm::Traversal(discipline) => {
            let (d, ev) = TraversalDriver::start(graph, discipline, ctx.start, ctx.seed)?;
            Ok((Box::new(d), ev))
        }
        Algorithm::ConnectedComponents => {
            let (d, ev) = ConnectedComponentsDriver::start(graph, ctx.start)?;
            Ok((Box::new(d), ev))
        }
        Algorithm::ShortestPath => {
            let (d, ev) = ShortestPathDriver::start(graph, ctx.start, ctx.end)?;
            Ok((Box::new(d), ev))
        }
        Algorithm::ExtremeVertexScan => {
            let (d, ev) = ExtremeVertexScanDriver::start(graph)?;
            Ok((Box::new(d), ev))
        }
        Algorithm::ExtremeEdgeScan => {
            let (d, ev) = ExtremeEdgeScanDriver::start(graph)?;
            Ok((Box::new(d), ev))
        }
        Algorithm::ConvexHull => {
            let (d, ev) = ConvexHullDriver::start(graph)?;
            Ok((Box::new(d), ev))
        }
    }
}

fn require_nonempty(graph: &Graph) -> Result<(), StartError> {
    if graph.num_vertices() == 0 {
        Err(StartError::EmptyGraph)
    } else {
        Ok(())
    }
}

fn require_start(graph: &Graph, start: VertexId) -> Result<(), StartError> {
    if graph.contains(start) {
        Ok(())
    } else {
        Err(StartError::InvalidStartVertex {
            start,
            num_vertices: graph.num_vertices(),
        })
    }
}

fn require_end(graph: &Graph, end: VertexId) -> Result<(), StartError> {
    if graph.contains(end) {
        Ok(())
    } else {
        Err(StartError::InvalidEndVertex {
            end,
            num_vertices: graph.num_vertices(),
        })
    }
}

/// Bulk reset: every vertex and edge re-classified undiscovered.
fn reset_events(graph: &Graph) -> Vec<StepEvent> {
    let mut events = Vec::with_capacity(graph.num_vertices() + graph.num_edges());
    for i in 0..graph.num_vertices() {
        events.push(StepEvent::VertexClassified {
            vertex: VertexId(i),
            role: VertexRole::Undiscovered,
        });
    }
    for i in 0..graph.num_edges() {
        events.push(StepEvent::EdgeClassified {
            edge: EdgeId(i),
            role: EdgeRole::Undiscovered,
        });
    }
    events
}

/// The vertex popped on the previous step settles into its final color: the
/// start vertex keeps its marker, a vertex gone from the frontier joins the
/// spanning tree, one still pending stays "discovered earlier".
fn settle_last_visited(
    frontier: &Frontier,
    start: Option<VertexId>,
    last: Option<VertexId>,
    events: &mut Vec<StepEvent>,
) {
    let Some(v) = last else {
        return;
    };
    let role = if start == Some(v) {
        VertexRole::StartVertex
    } else if !frontier.contains(v) {
        VertexRole::SpanningTree
    } else {
        VertexRole::DiscoveredEarlier
    };
    events.push(StepEvent::VertexClassified { vertex: v, role });
}

/// Frontier contents for the UI list.
fn snapshot(frontier: &Frontier) -> StepEvent {
    let distances = match frontier.discipline() {
        Discipline::PriorityQueue => Some(frontier.distances()),
        _ => None,
    };
    StepEvent::FrontierSnapshot {
        vertices: frontier.vertices(),
        distances,
    }
}

#[cfg(test)]
mod tests;
