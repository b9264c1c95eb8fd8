//! Brute-force convex hull over vertex coordinates.

use nalgebra::Vector2;

use super::require_nonempty;
use crate::engine::{
    Driver, RunSummary, StartError, StepError, StepEvent, StepResult, VertexRole,
};
use crate::graph::{Graph, VertexId};

/// Two-level pair machine: one step tests segment (i, j), i < j, against
/// every other vertex. The segment joins the hull iff all non-collinear
/// vertices fall on one side of its line; collinear vertices are tolerated
/// only between the endpoints. The outer index advances once the inner
/// index has swept past the last vertex.
pub struct ConvexHullDriver<'g> {
    graph: &'g Graph,
    i: usize,
    j: usize,
    segments: Vec<(VertexId, VertexId)>,
    done: bool,
}

impl<'g> ConvexHullDriver<'g> {
    pub fn start(graph: &'g Graph) -> Result<(Self, Vec<StepEvent>), StartError> {
        require_nonempty(graph)?;
        let events = (0..graph.num_vertices())
            .map(|i| StepEvent::VertexClassified {
                vertex: VertexId(i),
                role: VertexRole::Undiscovered,
            })
            .collect();
        Ok((
            Self {
                graph,
                i: 0,
                j: 1,
                segments: Vec::new(),
                done: false,
            },
            events,
        ))
    }

    fn point(&self, v: usize) -> Vector2<f64> {
        self.graph.vertex(VertexId(v)).coords()
    }
}

/// Whether collinear `p3` lies on segment (p1, p2), by coordinate bounds.
fn is_between(p1: Vector2<f64>, p2: Vector2<f64>, p3: Vector2<f64>) -> bool {
    p3.x >= p1.x.min(p2.x)
        && p3.x <= p1.x.max(p2.x)
        && p3.y >= p1.y.min(p2.y)
        && p3.y <= p1.y.max(p2.y)
}

impl Driver for ConvexHullDriver<'_> {
    fn step(&mut self) -> Result<StepResult, StepError> {
        if self.done {
            return Err(StepError::AlreadyDone);
        }
        let n = self.graph.num_vertices();
        if n < 2 {
            self.done = true;
            return Ok(StepResult::Done(vec![StepEvent::RunFinished {
                summary: RunSummary::Hull {
                    segments: Vec::new(),
                },
            }]));
        }

        let mut events = Vec::new();
        let (i, j) = (self.i, self.j);
        events.push(StepEvent::VertexClassified {
            vertex: VertexId(i),
            role: VertexRole::HullCandidate,
        });
        events.push(StepEvent::VertexClassified {
            vertex: VertexId(j),
            role: VertexRole::Visiting,
        });

        let p1 = self.point(i);
        let p2 = self.point(j);
        // Line through p1, p2 as a*x + b*y = c in (lon, lat) coordinates.
        let a = p2.y - p1.y;
        let b = p1.x - p2.x;
        let c = p1.x * p2.y - p1.y * p2.x;

        let mut looking_for_positive = false;
        let mut first_test_point = true;
        let mut found_problem = false;
        for k in 0..n {
            if k == i || k == j {
                continue;
            }
            let p3 = self.point(k);
            let check = a * p3.x + b * p3.y - c;
            if check == 0.0 {
                if is_between(p1, p2, p3) {
                    continue;
                }
                found_problem = true;
                break;
            }
            if first_test_point {
                looking_for_positive = check > 0.0;
                first_test_point = false;
            } else if looking_for_positive != (check > 0.0) {
                found_problem = true;
                break;
            }
        }

        if found_problem {
            events.push(StepEvent::HullSegment {
                from: VertexId(i),
                to: VertexId(j),
                accepted: false,
            });
            events.push(StepEvent::VertexClassified {
                vertex: VertexId(j),
                role: VertexRole::Discarded,
            });
        } else {
            self.segments.push((VertexId(i), VertexId(j)));
            events.push(StepEvent::HullSegment {
                from: VertexId(i),
                to: VertexId(j),
                accepted: true,
            });
            events.push(StepEvent::VertexClassified {
                vertex: VertexId(i),
                role: VertexRole::HullAccepted,
            });
            events.push(StepEvent::VertexClassified {
                vertex: VertexId(j),
                role: VertexRole::HullAccepted,
            });
        }

        self.j += 1;
        if self.j == n {
            events.push(StepEvent::VertexClassified {
                vertex: VertexId(self.i),
                role: VertexRole::Discarded,
            });
            self.i += 1;
            self.j = self.i + 1;
            if self.i == n - 1 {
                self.done = true;
                events.push(StepEvent::RunFinished {
                    summary: RunSummary::Hull {
                        segments: self.segments.clone(),
                    },
                });
                return Ok(StepResult::Done(events));
            }
        }
        Ok(StepResult::Continue(events))
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
