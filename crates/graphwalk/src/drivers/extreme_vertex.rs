//! Extreme-vertex scan: one linear pass tracking six running leaders.

use super::require_nonempty;
use crate::engine::{
    Driver, StartError, StepError, StepEvent, StepResult, RunSummary, VertexLeaders, VertexRole,
};
use crate::graph::{Graph, VertexId};

/// Examines one vertex per step against north/south/east/west extremes and
/// shortest/longest label. Strict comparisons, so the first-seen vertex
/// keeps a tied lead. A displaced leader is discarded only once it leads no
/// category; any leadership change re-emits all six leaders.
pub struct ExtremeVertexScanDriver<'g> {
    graph: &'g Graph,
    next: usize,
    leaders: VertexLeaders,
    done: bool,
}

impl<'g> ExtremeVertexScanDriver<'g> {
    pub fn start(graph: &'g Graph) -> Result<(Self, Vec<StepEvent>), StartError> {
        require_nonempty(graph)?;
        let mut events = Vec::with_capacity(graph.num_vertices() + 1);
        for i in 0..graph.num_vertices() {
            events.push(StepEvent::VertexClassified {
                vertex: VertexId(i),
                role: VertexRole::Undiscovered,
            });
        }
        events.push(StepEvent::VertexClassified {
            vertex: VertexId(0),
            role: VertexRole::Visiting,
        });
        Ok((
            Self {
                graph,
                next: 0,
                leaders: VertexLeaders::all(VertexId(0)),
                done: false,
            },
            events,
        ))
    }

    fn label_len(&self, v: VertexId) -> usize {
        self.graph.vertex(v).label.chars().count()
    }
}

impl Driver for ExtremeVertexScanDriver<'_> {
    fn step(&mut self) -> Result<StepResult, StepError> {
        if self.done {
            return Err(StepError::AlreadyDone);
        }
        let mut events = Vec::new();
        let vertex = VertexId(self.next);
        let mut defeated: Vec<VertexId> = Vec::new();
        let mut found_new_leader = false;

        if self.next == 0 {
            self.leaders = VertexLeaders::all(vertex);
            found_new_leader = true;
        } else {
            let cand = self.graph.vertex(vertex);
            if cand.lat > self.graph.vertex(self.leaders.north).lat {
                found_new_leader = true;
                defeated.push(self.leaders.north);
                self.leaders.north = vertex;
            }
            if cand.lat < self.graph.vertex(self.leaders.south).lat {
                found_new_leader = true;
                defeated.push(self.leaders.south);
                self.leaders.south = vertex;
            }
            if cand.lon > self.graph.vertex(self.leaders.east).lon {
                found_new_leader = true;
                defeated.push(self.leaders.east);
                self.leaders.east = vertex;
            }
            if cand.lon < self.graph.vertex(self.leaders.west).lon {
                found_new_leader = true;
                defeated.push(self.leaders.west);
                self.leaders.west = vertex;
            }
            let len = cand.label.chars().count();
            if len < self.label_len(self.leaders.short_label) {
                found_new_leader = true;
                defeated.push(self.leaders.short_label);
                self.leaders.short_label = vertex;
            }
            if len > self.label_len(self.leaders.long_label) {
                found_new_leader = true;
                defeated.push(self.leaders.long_label);
                self.leaders.long_label = vertex;
            }
        }

        for loser in defeated {
            if !self.leaders.contains(loser) {
                events.push(StepEvent::VertexClassified {
                    vertex: loser,
                    role: VertexRole::Discarded,
                });
            }
        }

        if found_new_leader {
            // Often redundant, but simpler than tracking which of the six
            // actually changed.
            for (kind, leader) in self.leaders.iter() {
                events.push(StepEvent::VertexClassified {
                    vertex: leader,
                    role: VertexRole::Leader(kind),
                });
            }
        } else {
            events.push(StepEvent::VertexClassified {
                vertex,
                role: VertexRole::Discarded,
            });
        }

        self.next += 1;
        if self.next < self.graph.num_vertices() {
            events.push(StepEvent::VertexClassified {
                vertex: VertexId(self.next),
                role: VertexRole::Visiting,
            });
            Ok(StepResult::Continue(events))
        } else {
            self.done = true;
            events.push(StepEvent::RunFinished {
                summary: RunSummary::ExtremeVertices {
                    leaders: self.leaders,
                },
            });
            Ok(StepResult::Done(events))
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
