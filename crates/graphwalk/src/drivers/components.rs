//! Connected-component enumeration by repeated breadth-first sweeps.

use super::{require_nonempty, require_start, reset_events, settle_last_visited, snapshot};
use crate::engine::{
    Driver, EdgeRole, RunSummary, StartError, StepError, StepEvent, StepResult, VertexRole,
    VisitState,
};
use crate::frontier::{Discipline, Frontier, FrontierEntry};
use crate::graph::{Graph, VertexId};

/// BFS to exhaustion, restarted on every leftover unvisited vertex.
///
/// Visited flags persist across sub-runs; only the frontier restarts. When
/// the frontier drains with unvisited vertices remaining, the next component
/// starts from the highest-indexed one within the same step.
pub struct ConnectedComponentsDriver<'g> {
    graph: &'g Graph,
    frontier: Frontier,
    visit: VisitState,
    component: usize,
    last_visited: Option<VertexId>,
    done: bool,
}

impl<'g> ConnectedComponentsDriver<'g> {
    pub fn start(graph: &'g Graph, start: VertexId) -> Result<(Self, Vec<StepEvent>), StartError> {
        require_nonempty(graph)?;
        require_start(graph, start)?;

        let mut frontier = Frontier::new(Discipline::Queue, 0);
        let visit = VisitState::new(graph.num_vertices());
        frontier.push(FrontierEntry {
            vertex: start,
            via: None,
            dist: 0.0,
        });

        let mut events = reset_events(graph);
        events.push(StepEvent::VertexClassified {
            vertex: start,
            role: VertexRole::StartVertex,
        });
        events.push(StepEvent::ComponentStarted {
            index: 1,
            start,
        });
        events.push(snapshot(&frontier));

        Ok((
            Self {
                graph,
                frontier,
                visit,
                component: 1,
                last_visited: None,
                done: false,
            },
            events,
        ))
    }
}

impl Driver for ConnectedComponentsDriver<'_> {
    fn step(&mut self) -> Result<StepResult, StepError> {
        if self.done {
            return Err(StepError::AlreadyDone);
        }
        let mut events = Vec::new();
        settle_last_visited(&self.frontier, None, self.last_visited.take(), &mut events);

        if self.frontier.is_empty() {
            match self.visit.highest_unvisited() {
                None => {
                    self.done = true;
                    events.push(StepEvent::RunFinished {
                        summary: RunSummary::Components {
                            count: self.component,
                        },
                    });
                    return Ok(StepResult::Done(events));
                }
                Some(next_start) => {
                    self.component += 1;
                    self.frontier.push(FrontierEntry {
                        vertex: next_start,
                        via: None,
                        dist: 0.0,
                    });
                    events.push(StepEvent::VertexClassified {
                        vertex: next_start,
                        role: VertexRole::StartVertex,
                    });
                    events.push(StepEvent::ComponentStarted {
                        index: self.component,
                        start: next_start,
                    });
                    events.push(snapshot(&self.frontier));
                    return Ok(StepResult::Continue(events));
                }
            }
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
