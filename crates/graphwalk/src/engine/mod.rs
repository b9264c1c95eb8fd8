//! Step contract shared by every algorithm driver.
//!
//! Purpose
//! - Define the run configuration (`RunContext`), the event vocabulary the
//!   drivers emit for renderers (`StepEvent` and the role enums), the
//!   `Driver` trait with its `Continue`/`Done` step protocol, and the error
//!   taxonomy for starting and stepping runs.
//! - Pure state transitions only: a renderer subscribes to the emitted
//!   events and never reaches back into driver internals.
//!
//! Code cross-refs: `drivers::start` dispatches a `RunContext` to a concrete
//! driver; `engine::scheduler::Scheduler` owns the active driver and calls
//! `step` once per external tick.

use std::fmt;

use crate::frontier::Discipline;
use crate::graph::{EdgeId, VertexId};

pub mod scheduler;
pub mod visit;

pub use scheduler::{Scheduler, Tick};
pub use visit::{PopRecord, VisitState};

/// Which state machine to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// BFS / DFS / RFS depending on the discipline.
    Traversal(Discipline),
    ConnectedComponents,
    ShortestPath,
    ExtremeVertexScan,
    ExtremeEdgeScan,
    ConvexHull,
}

/// Parameters governing one run. Validated before the first step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunContext {
    pub algorithm: Algorithm,
    pub start: VertexId,
    pub end: Option<VertexId>,
    /// Delay between scheduler ticks, for the external timer.
    pub delay_ms: u64,
    /// Seed for the random-pick discipline; runs are otherwise deterministic.
    pub seed: u64,
}

impl RunContext {
    pub fn new(algorithm: Algorithm, start: VertexId) -> Self {
        Self {
            algorithm,
            start,
            end: None,
            delay_ms: 50,
            seed: 0,
        }
    }
}

/// Rendering classification of a vertex after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexRole {
    Undiscovered,
    Visiting,
    Discovered,
    DiscoveredEarlier,
    VisitedEarlier,
    Discarded,
    Leader(VertexLeaderKind),
    StartVertex,
    SpanningTree,
    HullCandidate,
    HullAccepted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexLeaderKind {
    North,
    South,
    East,
    West,
    ShortLabel,
    LongLabel,
}

/// Rendering classification of an edge after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeRole {
    Undiscovered,
    Visiting,
    /// Followed to a currently discovered-but-unvisited vertex.
    Candidate,
    /// First discovered its far endpoint (or demoted scan leader).
    SpanningTree,
    /// Led to an already-visited vertex.
    NonTree,
    Discarded,
    Leader(EdgeLeaderKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeLeaderKind {
    Shortest,
    Longest,
    ShortLabel,
    LongLabel,
}

/// Current leaders of the extreme-vertex scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexLeaders {
    pub north: VertexId,
    pub south: VertexId,
    pub east: VertexId,
    pub west: VertexId,
    pub short_label: VertexId,
    pub long_label: VertexId,
}

impl VertexLeaders {
    pub fn all(v: VertexId) -> Self {
        Self {
            north: v,
            south: v,
            east: v,
            west: v,
            short_label: v,
            long_label: v,
        }
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.iter().any(|(_, leader)| leader == v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexLeaderKind, VertexId)> {
        [
            (VertexLeaderKind::North, self.north),
            (VertexLeaderKind::South, self.south),
            (VertexLeaderKind::East, self.east),
            (VertexLeaderKind::West, self.west),
            (VertexLeaderKind::ShortLabel, self.short_label),
            (VertexLeaderKind::LongLabel, self.long_label),
        ]
        .into_iter()
    }
}

/// Final leaders of the extreme-edge scan. The distances are infinities when
/// the graph has no edges (and all leader ids `None`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLeaders {
    pub shortest: Option<EdgeId>,
    pub longest: Option<EdgeId>,
    pub short_label: Option<EdgeId>,
    pub long_label: Option<EdgeId>,
    pub min_feet: f64,
    pub max_feet: f64,
}

/// Algorithm-specific payload of the final event.
#[derive(Clone, Debug, PartialEq)]
pub enum RunSummary {
    Traversal {
        num_visited: usize,
        num_visited_coming_out: usize,
        num_already_visited: usize,
    },
    Components {
        count: usize,
    },
    ShortestPath {
        /// Start-to-end provenance edges; empty when no end was requested.
        path: Vec<EdgeId>,
        total_miles: f64,
    },
    ExtremeVertices {
        leaders: VertexLeaders,
    },
    ExtremeEdges {
        leaders: EdgeLeaders,
    },
    Hull {
        /// Accepted segments in acceptance order.
        segments: Vec<(VertexId, VertexId)>,
    },
}

/// One observable consequence of a step, sufficient for a renderer to update
/// a marker, polyline, or table row without re-deriving algorithm state.
#[derive(Clone, Debug, PartialEq)]
pub enum StepEvent {
    VertexClassified {
        vertex: VertexId,
        role: VertexRole,
    },
    EdgeClassified {
        edge: EdgeId,
        role: EdgeRole,
    },
    FrontierSnapshot {
        vertices: Vec<VertexId>,
        /// Cumulative distances under the priority discipline.
        distances: Option<Vec<f64>>,
    },
    /// A candidate or accepted hull line between two vertices (hull segments
    /// are vertex pairs, not graph edges).
    HullSegment {
        from: VertexId,
        to: VertexId,
        accepted: bool,
    },
    ComponentStarted {
        index: usize,
        start: VertexId,
    },
    RunFinished {
        summary: RunSummary,
    },
}

/// Outcome of one driver step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    Continue(Vec<StepEvent>),
    Done(Vec<StepEvent>),
}

impl StepResult {
    pub fn events(&self) -> &[StepEvent] {
        match self {
            StepResult::Continue(ev) | StepResult::Done(ev) => ev,
        }
    }
}

/// Validation failure before the first step. No partial state is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    EmptyGraph,
    InvalidStartVertex { start: VertexId, num_vertices: usize },
    InvalidEndVertex { end: VertexId, num_vertices: usize },
    /// A run is active; callers must `reset` before starting another.
    RunActive,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "graph has no vertices"),
            Self::InvalidStartVertex {
                start,
                num_vertices,
            } => write!(
                f,
                "start vertex {} out of range (graph has {num_vertices} vertices)",
                start.0
            ),
            Self::InvalidEndVertex { end, num_vertices } => write!(
                f,
                "end vertex {} out of range (graph has {num_vertices} vertices)",
                end.0
            ),
            Self::RunActive => write!(f, "a run is active; reset before starting another"),
        }
    }
}

impl std::error::Error for StartError {}

/// Step failure. `AlreadyDone` is a caller contract violation; the state
/// machine does not mutate further. `PathReconstruction` marks the run as
/// failed (unreachable end vertex or a bookkeeping defect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    AlreadyDone,
    PathReconstruction { vertex: VertexId },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDone => write!(f, "step() called after Done"),
            Self::PathReconstruction { vertex } => write!(
                f,
                "no reconstruction entry reaches vertex {}",
                vertex.0
            ),
        }
    }
}

impl std::error::Error for StepError {}

/// One cooperative state machine. All work in a `step` call completes
/// synchronously; drivers never block.
pub trait Driver {
    fn step(&mut self) -> Result<StepResult, StepError>;
    fn is_done(&self) -> bool;
}
