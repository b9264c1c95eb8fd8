//! Graph traversal driver: BFS, DFS, or random-first search by discipline.

use super::{require_nonempty, require_start, reset_events, settle_last_visited, snapshot};
use crate::engine::{
    Driver, EdgeRole, RunSummary, StartError, StepError, StepEvent, StepResult, VertexRole,
    VisitState,
};
use crate::frontier::{Discipline, Frontier, FrontierEntry};
use crate::graph::{Graph, VertexId};

/// One traversal run over a frontier with the chosen pop discipline.
///
/// Every step pops one entry. A stale pop (vertex already visited) is
/// classified by whether the vertex still sits elsewhere in the frontier and
/// its provenance edge leaves the spanning tree; a fresh pop marks the
/// vertex visited and discovers its unvisited neighbors as one wave.
pub struct TraversalDriver<'g> {
    graph: &'g Graph,
    frontier: Frontier,
    visit: VisitState,
    start: VertexId,
    last_visited: Option<VertexId>,
    done: bool,
}

impl<'g> TraversalDriver<'g> {
    pub fn start(
        graph: &'g Graph,
        discipline: Discipline,
        start: VertexId,
        seed: u64,
    ) -> Result<(Self, Vec<StepEvent>), StartError> {
        require_nonempty(graph)?;
        require_start(graph, start)?;

        let mut frontier = Frontier::new(discipline, seed);
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
                last_visited: None,
                done: false,
            },
            events,
        ))
    }
}

impl Driver for TraversalDriver<'_> {
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

        if self.frontier.is_empty() {
            self.done = true;
            events.push(StepEvent::RunFinished {
                summary: RunSummary::Traversal {
                    num_visited: self.visit.num_visited,
                    num_visited_coming_out: self.visit.num_visited_coming_out,
                    num_already_visited: self.visit.num_already_visited,
                },
            });
            return Ok(StepResult::Done(events));
        }

        let entry = self.frontier.pop().expect("frontier checked non-empty");
        let vertex = entry.vertex;
        self.visit.num_visited_coming_out += 1;
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
            self.visit.mark_visited(vertex);
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
                        dist: 0.0,
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
