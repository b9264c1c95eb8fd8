//! Single-source shortest path over great-circle miles (Dijkstra).

use super::{
    require_end, require_nonempty, require_start, reset_events, settle_last_visited, snapshot,
};
use crate::engine::{
    Driver, EdgeRole, PopRecord, RunSummary, StartError, StepError, StepEvent, StepResult,
    VertexRole, VisitState,
};
use crate::frontier::{Discipline, Frontier, FrontierEntry};
use crate::graph::{EdgeId, Graph, VertexId};

/// Priority-frontier scan with non-negative weights.
///
/// Stale pops (vertex already visited) represent superseded paths and are
/// discarded; fresh pops join the pop-order reconstruction table, which the
/// termination step backtraces from the end vertex. Cumulative distance is
/// monotone along the pop order.
pub struct ShortestPathDriver<'g> {
    graph: &'g Graph,
    frontier: Frontier,
    visit: VisitState,
    start: VertexId,
    end: Option<VertexId>,
    last_visited: Option<VertexId>,
    done: bool,
}

impl<'g> ShortestPathDriver<'g> {
    /// With `end = None` the scan runs to frontier exhaustion (a full
    /// shortest-path tree) and the summary carries an empty path.
    pub fn start(
        graph: &'g Graph,
        start: VertexId,
        end: Option<VertexId>,
    ) -> Result<(Self, Vec<StepEvent>), StartError> {
        require_nonempty(graph)?;
        require_start(graph, start)?;
        if let Some(end) = end {
            require_end(graph, end)?;
        }

        let mut frontier = Frontier::new(Discipline::PriorityQueue, 0);
        let mut visit = VisitState::new(graph.num_vertices());
        frontier.push(FrontierEntry {
            vertex: start,
            via: None,
            dist: 0.0,
        });
        visit.num_visited += 1;

        let mut events = reset_events(graph);
        events.push(StepEvent::VertexClassified {
            vertex: start,
            role: VertexRole::StartVertex,
        });
        events.push(snapshot(&frontier));

        Ok((
            Self {
                graph,
                frontier,
                visit,
                start,
                end,
                last_visited: None,
                done: false,
            },
            events,
        ))
    }

    /// Walk the reconstruction table from `end` back to the start, following
    /// each entry's provenance edge to its other endpoint. Always succeeds
    /// for a reachable end vertex.
    fn backtrace(&self, end: VertexId) -> Result<(Vec<EdgeId>, f64), StepError> {
        let table = &self.visit.pop_order;
        let end_rec = self
            .visit
            .pop_record_of(end)
            .ok_or(StepError::PathReconstruction { vertex: end })?;
        let total = end_rec.dist;
        let mut path = Vec::new();
        let mut cur = end_rec;
        while cur.vertex != self.start {
            let edge = cur
                .via
                .ok_or(StepError::PathReconstruction { vertex: cur.vertex })?;
            path.push(edge);
            let prev = self.graph.edge(edge).other_endpoint(cur.vertex);
            cur = table
                .iter()
                .find(|r| r.vertex == prev)
                .ok_or(StepError::PathReconstruction { vertex: prev })?;
        }
        path.reverse();
        Ok((path, total))
    }
}

impl Driver for ShortestPathDriver<'_> {
    fn step(&mut self) -> Result<StepResult, StepError> {
        if self.done {
            return Err(StepError::AlreadyDone);
        }
        let mut events = Vec::new();
        settle_last_visited(
            &self.frontier,
            Some(self.start),
            self.last_visited.take(),
            &mut events,
        );

        let end_reached = match self.end {
            Some(end) if end != self.start => self.visit.is_visited(end),
            _ => false,
        };
        if self.frontier.is_empty() || end_reached {
            self.done = true;
            let summary = match self.end {
                Some(end) if end != self.start => {
                    let (path, total_miles) = self.backtrace(end)?;
                    RunSummary::ShortestPath { path, total_miles }
                }
                _ => RunSummary::ShortestPath {
                    path: Vec::new(),
                    total_miles: 0.0,
                },
            };
            events.push(StepEvent::RunFinished { summary });
            return Ok(StepResult::Done(events));
        }

        let entry = self.frontier.pop().expect("frontier checked non-empty");
        let vertex = entry.vertex;
        self.visit.num_visited += 1;
        self.last_visited = Some(vertex);

        if self.visit.is_visited(vertex) {
            self.visit.num_already_visited += 1;
            let role = if self.frontier.contains(vertex) {
                VertexRole::VisitedEarlier
            } else {
                VertexRole::DiscoveredEarlier
            };
            events.push(StepEvent::VertexClassified { vertex, role });
            if let Some(edge) = entry.via {
                events.push(StepEvent::EdgeClassified {
                    edge,
                    role: EdgeRole::NonTree,
                });
            }
        } else {
            self.visit.num_visited_coming_out += 1;
            self.visit.mark_visited(vertex);
            self.visit.record_pop(PopRecord {
                vertex,
                via: entry.via,
                dist: entry.dist,
            });
            events.push(StepEvent::VertexClassified {
                vertex,
                role: VertexRole::Visiting,
            });
            if let Some(edge) = entry.via {
                events.push(StepEvent::EdgeClassified {
                    edge,
                    role: EdgeRole::SpanningTree,
                });
            }
            let mut wave = Vec::new();
            for (neighbor, edge) in self.graph.adjacent_of(vertex) {
                if !self.visit.is_visited(neighbor) {
                    wave.push(FrontierEntry {
                        vertex: neighbor,
                        via: Some(edge),
                        dist: entry.dist + self.graph.distance_miles(vertex, neighbor),
                    });
                    events.push(StepEvent::VertexClassified {
                        vertex: neighbor,
                        role: VertexRole::Discovered,
                    });
                    events.push(StepEvent::EdgeClassified {
                        edge,
                        role: EdgeRole::Candidate,
                    });
                }
            }
            self.frontier.push_batch(wave);
        }

        events.push(snapshot(&self.frontier));
        Ok(StepResult::Continue(events))
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
