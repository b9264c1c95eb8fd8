//! The frontier: discovered-but-not-yet-processed vertex entries.
//!
//! Purpose
//! - One ordered collection shared by every traversal-family driver; the pop
//!   discipline is what turns the same loop into BFS, DFS, random-first
//!   search, or Dijkstra.
//! - A vertex may sit in the frontier several times; duplicate discovery is
//!   legal and drives the "already visited" classification in the drivers.
//!
//! All operations are O(n) or better; the priority discipline keeps the
//! entries sorted by re-sorting after every push (stable, so ties keep
//! discovery order). Fine for visualization-scale graphs.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{EdgeId, VertexId};

/// Pop policy of the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discipline {
    /// LIFO pop (depth-first search).
    Stack,
    /// FIFO pop (breadth-first search).
    Queue,
    /// Pop the minimum cumulative distance; ties by insertion order.
    PriorityQueue,
    /// Pop a uniformly random entry (random-first search).
    RandomPick,
}

impl Discipline {
    /// Display name of the backing structure, as shown to users.
    pub fn structure_name(self) -> &'static str {
        match self {
            Discipline::Stack => "Stack",
            Discipline::Queue => "Queue",
            Discipline::PriorityQueue => "PQueue",
            Discipline::RandomPick => "List",
        }
    }
}

/// One discovered vertex: where it is, the edge it was discovered through,
/// and the accumulated distance (meaningful only under `PriorityQueue`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontierEntry {
    pub vertex: VertexId,
    pub via: Option<EdgeId>,
    pub dist: f64,
}

/// Contract error: `pop` on an empty frontier. Drivers always check
/// `is_empty` first, so hitting this indicates a scheduler or driver bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFrontier;

impl fmt::Display for EmptyFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pop from an empty frontier")
    }
}

impl std::error::Error for EmptyFrontier {}

/// Ordered collection of [`FrontierEntry`] with a pluggable pop discipline.
#[derive(Debug)]
pub struct Frontier {
    discipline: Discipline,
    entries: Vec<FrontierEntry>,
    rng: StdRng,
}

impl Frontier {
    /// `seed` only influences the `RandomPick` discipline.
    pub fn new(discipline: Discipline, seed: u64) -> Self {
        Self {
            discipline,
            entries: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Linear-scan membership test, used to tell "still pending" apart from
    /// "already removed" when classifying revisits.
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.entries.iter().any(|e| e.vertex == vertex)
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        self.entries.push(entry);
        if self.discipline == Discipline::PriorityQueue {
            self.sort_by_dist();
        }
    }

    /// Push one discovery wave. Under the `Stack` discipline the wave is
    /// reversed so its first entry pops first, which makes the LIFO pop
    /// realize recursive depth-first preorder; every other discipline keeps
    /// the given order.
    pub fn push_batch(&mut self, wave: Vec<FrontierEntry>) {
        match self.discipline {
            Discipline::Stack => self.entries.extend(wave.into_iter().rev()),
            _ => self.entries.extend(wave),
        }
        if self.discipline == Discipline::PriorityQueue {
            self.sort_by_dist();
        }
    }

    pub fn pop(&mut self) -> Result<FrontierEntry, EmptyFrontier> {
        if self.entries.is_empty() {
            return Err(EmptyFrontier);
        }
        let entry = match self.discipline {
            Discipline::Stack => self.entries.pop(),
            Discipline::Queue | Discipline::PriorityQueue => Some(self.entries.remove(0)),
            Discipline::RandomPick => {
                let idx = self.rng.gen_range(0..self.entries.len());
                Some(self.entries.remove(idx))
            }
        };
        entry.ok_or(EmptyFrontier)
    }

    /// Vertex ids in current pop-candidate order (front of the list first).
    pub fn vertices(&self) -> Vec<VertexId> {
        self.entries.iter().map(|e| e.vertex).collect()
    }

    /// Cumulative distances in the same order as [`Frontier::vertices`].
    pub fn distances(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.dist).collect()
    }

    fn sort_by_dist(&mut self) {
        // Vec::sort_by is stable, so equal distances keep insertion order.
        self.entries
            .sort_by(|a, b| a.dist.partial_cmp(&b.dist).unwrap_or(std::cmp::Ordering::Equal));
    }
}
