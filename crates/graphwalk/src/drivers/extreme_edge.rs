//! Extreme-edge scan: linear pass over edges tracking four running leaders.

use crate::engine::{
    Driver, EdgeLeaderKind, EdgeLeaders, EdgeRole, RunSummary, StartError, StepError, StepEvent,
    StepResult,
};
use crate::graph::{EdgeId, Graph};

use super::require_nonempty;

/// Compares each edge's endpoint distance in feet (shortest/longest) and its
/// label length (shortest/longest). Demotions run one step late: leaders
/// displaced on step N drop to the spanning-tree rendering state on step
/// N+1 unless they still lead a category, and a step that changed nothing
/// demotes the edge it examined instead.
pub struct ExtremeEdgeScanDriver<'g> {
    graph: &'g Graph,
    current: usize,
    min_feet: f64,
    max_feet: f64,
    shortest: Option<EdgeId>,
    longest: Option<EdgeId>,
    short_label: Option<EdgeId>,
    long_label: Option<EdgeId>,
    /// (leader changed, displaced former leaders) from the previous step.
    pending: Option<(bool, Vec<EdgeId>)>,
    done: bool,
}

impl<'g> ExtremeEdgeScanDriver<'g> {
    pub fn start(graph: &'g Graph) -> Result<(Self, Vec<StepEvent>), StartError> {
        require_nonempty(graph)?;
        let events = (0..graph.num_edges())
            .map(|i| StepEvent::EdgeClassified {
                edge: EdgeId(i),
                role: EdgeRole::Undiscovered,
            })
            .collect();
        Ok((
            Self {
                graph,
                current: 0,
                min_feet: f64::INFINITY,
                max_feet: f64::NEG_INFINITY,
                shortest: None,
                longest: None,
                short_label: None,
                long_label: None,
                pending: None,
                done: false,
            },
            events,
        ))
    }

    fn is_leader(&self, e: EdgeId) -> bool {
        [self.shortest, self.longest, self.short_label, self.long_label]
            .into_iter()
            .flatten()
            .any(|id| id == e)
    }

    fn label_len(&self, e: EdgeId) -> usize {
        self.graph.edge(e).label.chars().count()
    }

    fn leader_events(&self, events: &mut Vec<StepEvent>) {
        let kinds = [
            (self.shortest, EdgeLeaderKind::Shortest),
            (self.longest, EdgeLeaderKind::Longest),
            (self.short_label, EdgeLeaderKind::ShortLabel),
            (self.long_label, EdgeLeaderKind::LongLabel),
        ];
        for (id, kind) in kinds {
            if let Some(edge) = id {
                events.push(StepEvent::EdgeClassified {
                    edge,
                    role: EdgeRole::Leader(kind),
                });
            }
        }
    }
}

impl Driver for ExtremeEdgeScanDriver<'_> {
    fn step(&mut self) -> Result<StepResult, StepError> {
        if self.done {
            return Err(StepError::AlreadyDone);
        }
        let mut events = Vec::new();

        if let Some((changed, displaced)) = self.pending.take() {
            if changed {
                self.leader_events(&mut events);
                for loser in displaced {
                    if !self.is_leader(loser) {
                        events.push(StepEvent::EdgeClassified {
                            edge: loser,
                            role: EdgeRole::SpanningTree,
                        });
                    }
                }
            } else {
                events.push(StepEvent::EdgeClassified {
                    edge: EdgeId(self.current - 1),
                    role: EdgeRole::SpanningTree,
                });
            }
        }

        if self.current == self.graph.num_edges() {
            self.done = true;
            events.push(StepEvent::RunFinished {
                summary: RunSummary::ExtremeEdges {
                    leaders: EdgeLeaders {
                        shortest: self.shortest,
                        longest: self.longest,
                        short_label: self.short_label,
                        long_label: self.long_label,
                        min_feet: self.min_feet,
                        max_feet: self.max_feet,
                    },
                },
            });
            return Ok(StepResult::Done(events));
        }

        let edge = EdgeId(self.current);
        events.push(StepEvent::EdgeClassified {
            edge,
            role: EdgeRole::Visiting,
        });

        let feet = self.graph.edge_feet(edge);
        let len = self.label_len(edge);
        let mut displaced = Vec::new();
        let mut changed = false;

        if feet < self.min_feet {
            if let Some(old) = self.shortest {
                displaced.push(old);
            }
            self.min_feet = feet;
            self.shortest = Some(edge);
            changed = true;
        }
        if feet > self.max_feet {
            if let Some(old) = self.longest {
                displaced.push(old);
            }
            self.max_feet = feet;
            self.longest = Some(edge);
            changed = true;
        }
        match self.short_label {
            Some(old) if self.label_len(old) > len => {
                displaced.push(old);
                self.short_label = Some(edge);
                changed = true;
            }
            None => {
                self.short_label = Some(edge);
                changed = true;
            }
            _ => {}
        }
        match self.long_label {
            Some(old) if self.label_len(old) < len => {
                displaced.push(old);
                self.long_label = Some(edge);
                changed = true;
            }
            None => {
                self.long_label = Some(edge);
                changed = true;
            }
            _ => {}
        }

        self.pending = Some((changed, displaced));
        self.current += 1;
        Ok(StepResult::Continue(events))
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
