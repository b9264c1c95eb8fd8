//! Driver scenario tests and reference cross-checks.

use nalgebra::Vector2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::engine::{
    Driver, EdgeRole, RunSummary, StepError, StepEvent, StepResult, VertexRole,
};
use crate::frontier::Discipline;
use crate::graph::rand::{draw_graph, RandomGraphCfg, ReplayToken, VertexCount};
use crate::graph::{Edge, EdgeId, Graph, Vertex, VertexId};

/// A(0,0) B(0,1) C(1,1) D(1,0) with edges A-B, B-C, C-D, D-A.
fn square() -> Graph {
    let vertices = vec![
        Vertex::new("A", 0.0, 0.0),
        Vertex::new("B", 0.0, 1.0),
        Vertex::new("C", 1.0, 1.0),
        Vertex::new("D", 1.0, 0.0),
    ];
    let edges = vec![
        Edge::new(0, 1, "A-B"),
        Edge::new(1, 2, "B-C"),
        Edge::new(2, 3, "C-D"),
        Edge::new(3, 0, "D-A"),
    ];
    Graph::load(vertices, edges).unwrap()
}

fn run_to_done(driver: &mut dyn Driver, mut events: Vec<StepEvent>) -> Vec<StepEvent> {
    loop {
        match driver.step().unwrap() {
            StepResult::Continue(ev) => events.extend(ev),
            StepResult::Done(ev) => {
                events.extend(ev);
                return events;
            }
        }
    }
}

/// First-time visit order: the `Visiting` classifications.
fn visit_order(events: &[StepEvent]) -> Vec<VertexId> {
    events
        .iter()
        .filter_map(|e| match e {
            StepEvent::VertexClassified {
                vertex,
                role: VertexRole::Visiting,
            } => Some(*vertex),
            _ => None,
        })
        .collect()
}

fn spanning_tree_edges(events: &[StepEvent]) -> Vec<EdgeId> {
    let mut out: Vec<EdgeId> = events
        .iter()
        .filter_map(|e| match e {
            StepEvent::EdgeClassified {
                edge,
                role: EdgeRole::SpanningTree,
            } => Some(*edge),
            _ => None,
        })
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

fn summary(events: &[StepEvent]) -> RunSummary {
    match events.last() {
        Some(StepEvent::RunFinished { summary }) => summary.clone(),
        other => panic!("run did not finish with a summary: {other:?}"),
    }
}

// ---------------------------------------------------------------- traversal

#[test]
fn bfs_square_visits_a_b_d_c() {
    let g = square();
    let (mut d, ev) = TraversalDriver::start(&g, Discipline::Queue, VertexId(0), 0).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(
        visit_order(&events),
        vec![VertexId(0), VertexId(1), VertexId(3), VertexId(2)]
    );
}

#[test]
fn dfs_square_visits_a_b_c_d() {
    let g = square();
    let (mut d, ev) = TraversalDriver::start(&g, Discipline::Stack, VertexId(0), 0).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(
        visit_order(&events),
        vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3)]
    );
}

#[test]
fn bfs_square_tree_has_three_edges() {
    let g = square();
    let (mut d, ev) = TraversalDriver::start(&g, Discipline::Queue, VertexId(0), 0).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(spanning_tree_edges(&events).len(), 3);
    match summary(&events) {
        RunSummary::Traversal {
            num_visited,
            num_visited_coming_out,
            num_already_visited,
        } => {
            assert_eq!(num_visited, 6);
            assert_eq!(num_visited_coming_out, 5);
            assert_eq!(num_already_visited, 1);
        }
        other => panic!("wrong summary: {other:?}"),
    }
}

#[test]
fn bfs_tree_spans_random_connected_graphs() {
    for seed in 0..8 {
        let g = draw_graph(
            RandomGraphCfg {
                vertex_count: VertexCount::Fixed(25),
                edge_factor: 0.9,
                connected: true,
                ..RandomGraphCfg::default()
            },
            ReplayToken { seed, index: 0 },
        );
        let (mut d, ev) = TraversalDriver::start(&g, Discipline::Queue, VertexId(0), 0).unwrap();
        let events = run_to_done(&mut d, ev);
        let order = visit_order(&events);
        assert_eq!(order.len(), g.num_vertices(), "seed {seed}");
        assert_eq!(
            spanning_tree_edges(&events).len(),
            g.num_vertices() - 1,
            "seed {seed}"
        );
    }
}

fn recursive_dfs(g: &Graph, start: VertexId) -> Vec<VertexId> {
    fn go(g: &Graph, v: VertexId, seen: &mut [bool], out: &mut Vec<VertexId>) {
        seen[v.0] = true;
        out.push(v);
        for (w, _) in g.adjacent_of(v) {
            if !seen[w.0] {
                go(g, w, seen, out);
            }
        }
    }
    let mut seen = vec![false; g.num_vertices()];
    let mut out = Vec::new();
    go(g, start, &mut seen, &mut out);
    out
}

#[test]
fn dfs_matches_recursive_reference_on_random_graphs() {
    for seed in 0..8 {
        let g = draw_graph(
            RandomGraphCfg {
                vertex_count: VertexCount::Fixed(18),
                edge_factor: 1.2,
                connected: true,
                ..RandomGraphCfg::default()
            },
            ReplayToken { seed, index: 1 },
        );
        let (mut d, ev) = TraversalDriver::start(&g, Discipline::Stack, VertexId(0), 0).unwrap();
        let events = run_to_done(&mut d, ev);
        assert_eq!(visit_order(&events), recursive_dfs(&g, VertexId(0)), "seed {seed}");
    }
}

#[test]
fn rfs_visits_every_vertex_exactly_once() {
    let g = draw_graph(
        RandomGraphCfg {
            vertex_count: VertexCount::Fixed(20),
            edge_factor: 1.0,
            connected: true,
            ..RandomGraphCfg::default()
        },
        ReplayToken { seed: 5, index: 0 },
    );
    let (mut d, ev) = TraversalDriver::start(&g, Discipline::RandomPick, VertexId(0), 99).unwrap();
    let events = run_to_done(&mut d, ev);
    let mut order = visit_order(&events);
    order.sort_unstable();
    let expected: Vec<VertexId> = (0..g.num_vertices()).map(VertexId).collect();
    assert_eq!(order, expected);
}

proptest! {
    #[test]
    fn bfs_first_visits_each_reachable_vertex_once(
        (n, raw_edges) in (2usize..12).prop_flat_map(|n| {
            (Just(n), proptest::collection::vec((0..n, 0..n), 0..25))
        })
    ) {
        let vertices = (0..n).map(|i| Vertex::new(format!("V{i}"), i as f64, 0.0)).collect();
        let edges = raw_edges
            .iter()
            .enumerate()
            .map(|(k, &(a, b))| Edge::new(a, b, format!("E{k}")))
            .collect();
        let g = Graph::load(vertices, edges).unwrap();

        // reachability reference
        let mut reach = vec![false; n];
        reach[0] = true;
        let mut work = vec![VertexId(0)];
        while let Some(v) = work.pop() {
            for (w, _) in g.adjacent_of(v) {
                if !reach[w.0] {
                    reach[w.0] = true;
                    work.push(w);
                }
            }
        }

        let (mut d, ev) = TraversalDriver::start(&g, Discipline::Queue, VertexId(0), 0).unwrap();
        let events = run_to_done(&mut d, ev);
        let order = visit_order(&events);
        let mut counts = vec![0usize; n];
        for v in &order {
            counts[v.0] += 1;
        }
        for i in 0..n {
            prop_assert_eq!(counts[i], usize::from(reach[i]), "vertex {}", i);
        }
    }
}

// --------------------------------------------------------------- components

struct Dsu(Vec<usize>);

impl Dsu {
    fn new(n: usize) -> Self {
        Self((0..n).collect())
    }
    fn find(&mut self, x: usize) -> usize {
        if self.0[x] != x {
            let root = self.find(self.0[x]);
            self.0[x] = root;
        }
        self.0[x]
    }
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.0[ra] = rb;
        true
    }
}

fn union_find_components(g: &Graph) -> usize {
    let mut dsu = Dsu::new(g.num_vertices());
    let mut count = g.num_vertices();
    for e in g.edges() {
        if dsu.union(e.v1.0, e.v2.0) {
            count -= 1;
        }
    }
    count
}

#[test]
fn components_two_disjoint_squares() {
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    for block in 0..2 {
        let base = block * 4;
        for i in 0..4 {
            vertices.push(Vertex::new(
                format!("P{}", base + i),
                block as f64 * 10.0 + (i / 2) as f64,
                (i % 2) as f64,
            ));
        }
        edges.push(Edge::new(base, base + 1, "a"));
        edges.push(Edge::new(base + 1, base + 2, "b"));
        edges.push(Edge::new(base + 2, base + 3, "c"));
        edges.push(Edge::new(base + 3, base, "d"));
    }
    let g = Graph::load(vertices, edges).unwrap();
    let (mut d, ev) = ConnectedComponentsDriver::start(&g, VertexId(0)).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(summary(&events), RunSummary::Components { count: 2 });
    // The second sub-run starts from the highest-indexed unvisited vertex.
    let starts: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            StepEvent::ComponentStarted { index, start } => Some((*index, *start)),
            _ => None,
        })
        .collect();
    assert_eq!(starts, vec![(1, VertexId(0)), (2, VertexId(7))]);
}

#[test]
fn component_count_matches_union_find_on_random_graphs() {
    for seed in 0..10 {
        let g = draw_graph(
            RandomGraphCfg {
                vertex_count: VertexCount::Fixed(30),
                edge_factor: 0.7,
                connected: false,
                ..RandomGraphCfg::default()
            },
            ReplayToken { seed, index: 2 },
        );
        let (mut d, ev) = ConnectedComponentsDriver::start(&g, VertexId(0)).unwrap();
        let events = run_to_done(&mut d, ev);
        assert_eq!(
            summary(&events),
            RunSummary::Components {
                count: union_find_components(&g)
            },
            "seed {seed}"
        );
    }
}

// ------------------------------------------------------------ shortest path

#[test]
fn dijkstra_square_takes_the_two_edge_path() {
    let g = square();
    let (mut d, ev) = ShortestPathDriver::start(&g, VertexId(0), Some(VertexId(2))).unwrap();
    let events = run_to_done(&mut d, ev);
    match summary(&events) {
        RunSummary::ShortestPath { path, total_miles } => {
            assert_eq!(path.len(), 2);
            // D-C is marginally shorter than B-C (longitude shrinks with
            // latitude), so the route goes A -> D -> C.
            assert_eq!(path, vec![EdgeId(3), EdgeId(2)]);
            let via_d =
                g.distance_miles(VertexId(0), VertexId(3)) + g.distance_miles(VertexId(3), VertexId(2));
            assert!((total_miles - via_d).abs() < 1e-9);
        }
        other => panic!("wrong summary: {other:?}"),
    }
}

fn reference_distances(g: &Graph, start: VertexId) -> Vec<f64> {
    let n = g.num_vertices();
    let mut dist = vec![f64::INFINITY; n];
    let mut fixed = vec![false; n];
    dist[start.0] = 0.0;
    loop {
        let mut best: Option<usize> = None;
        for i in 0..n {
            if !fixed[i] && dist[i].is_finite() && best.map_or(true, |b| dist[i] < dist[b]) {
                best = Some(i);
            }
        }
        let Some(u) = best else { break };
        fixed[u] = true;
        for (w, _) in g.adjacent_of(VertexId(u)) {
            let nd = dist[u] + g.distance_miles(VertexId(u), w);
            if nd < dist[w.0] {
                dist[w.0] = nd;
            }
        }
    }
    dist
}

#[test]
fn dijkstra_totals_match_reference_on_small_graphs() {
    for seed in 0..6 {
        let g = draw_graph(
            RandomGraphCfg {
                vertex_count: VertexCount::Fixed(12),
                edge_factor: 1.3,
                connected: true,
                ..RandomGraphCfg::default()
            },
            ReplayToken { seed, index: 3 },
        );
        let reference = reference_distances(&g, VertexId(0));
        for end in 1..g.num_vertices() {
            let (mut d, ev) =
                ShortestPathDriver::start(&g, VertexId(0), Some(VertexId(end))).unwrap();
            let events = run_to_done(&mut d, ev);
            match summary(&events) {
                RunSummary::ShortestPath { total_miles, path } => {
                    assert!(
                        (total_miles - reference[end]).abs() < 1e-9,
                        "seed {seed} end {end}: {total_miles} vs {}",
                        reference[end]
                    );
                    assert!(!path.is_empty());
                }
                other => panic!("wrong summary: {other:?}"),
            }
        }
    }
}

#[test]
fn dijkstra_unreachable_end_fails_reconstruction() {
    let vertices = vec![
        Vertex::new("A", 0.0, 0.0),
        Vertex::new("B", 0.0, 1.0),
        Vertex::new("C", 5.0, 5.0),
        Vertex::new("D", 5.0, 6.0),
    ];
    let edges = vec![Edge::new(0, 1, "ab"), Edge::new(2, 3, "cd")];
    let g = Graph::load(vertices, edges).unwrap();
    let (mut d, _ev) = ShortestPathDriver::start(&g, VertexId(0), Some(VertexId(2))).unwrap();
    let mut result = d.step();
    for _ in 0..50 {
        match &result {
            Ok(StepResult::Continue(_)) => result = d.step(),
            _ => break,
        }
    }
    assert_eq!(
        result,
        Err(StepError::PathReconstruction { vertex: VertexId(2) })
    );
    // The failed run is over; stepping again is a contract violation.
    assert_eq!(d.step(), Err(StepError::AlreadyDone));
}

#[test]
fn dijkstra_without_end_runs_to_exhaustion() {
    let g = square();
    let (mut d, ev) = ShortestPathDriver::start(&g, VertexId(0), None).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(
        visit_order(&events).len(),
        g.num_vertices(),
        "every vertex settles"
    );
    assert_eq!(
        summary(&events),
        RunSummary::ShortestPath {
            path: Vec::new(),
            total_miles: 0.0
        }
    );
}

// ------------------------------------------------------------ extreme scans

#[test]
fn vertex_scan_finds_known_extremes() {
    let vertices = vec![
        Vertex::new("Albany", 42.65, -73.75),
        Vertex::new("B", 45.0, -70.0),
        Vertex::new("Chittenango", 43.05, -75.87),
        Vertex::new("Dunkirk", 42.48, -79.33),
        Vertex::new("Erie", 42.12, -80.08),
    ];
    let g = Graph::load(vertices, Vec::new()).unwrap();
    let (mut d, ev) = ExtremeVertexScanDriver::start(&g).unwrap();
    let events = run_to_done(&mut d, ev);
    match summary(&events) {
        RunSummary::ExtremeVertices { leaders } => {
            assert_eq!(leaders.north, VertexId(1));
            assert_eq!(leaders.south, VertexId(4));
            assert_eq!(leaders.east, VertexId(1));
            assert_eq!(leaders.west, VertexId(4));
            assert_eq!(leaders.short_label, VertexId(1));
            assert_eq!(leaders.long_label, VertexId(2));
        }
        other => panic!("wrong summary: {other:?}"),
    }
    // Albany loses every category by the Dunkirk step and gets discarded.
    assert!(events.contains(&StepEvent::VertexClassified {
        vertex: VertexId(0),
        role: VertexRole::Discarded,
    }));
}

#[test]
fn vertex_scan_ties_keep_the_first_leader() {
    let vertices = vec![
        Vertex::new("AA", 10.0, 10.0),
        Vertex::new("BB", 10.0, 10.0),
    ];
    let g = Graph::load(vertices, Vec::new()).unwrap();
    let (mut d, ev) = ExtremeVertexScanDriver::start(&g).unwrap();
    let events = run_to_done(&mut d, ev);
    match summary(&events) {
        RunSummary::ExtremeVertices { leaders } => {
            assert!(leaders.iter().all(|(_, v)| v == VertexId(0)));
        }
        other => panic!("wrong summary: {other:?}"),
    }
}

#[test]
fn edge_scan_square_leaders_and_demotions() {
    let g = square();
    let (mut d, ev) = ExtremeEdgeScanDriver::start(&g).unwrap();
    let events = run_to_done(&mut d, ev);
    match summary(&events) {
        RunSummary::ExtremeEdges { leaders } => {
            // C-D runs along latitude 1, where a degree of longitude is
            // shorter than at the equator (A-B).
            assert_eq!(leaders.shortest, Some(EdgeId(2)));
            assert_eq!(leaders.longest, Some(EdgeId(0)));
            // All labels tie at three characters: first edge keeps both.
            assert_eq!(leaders.short_label, Some(EdgeId(0)));
            assert_eq!(leaders.long_label, Some(EdgeId(0)));
            assert!((leaders.min_feet - g.edge_feet(EdgeId(2))).abs() < 1e-6);
            assert!((leaders.max_feet - g.edge_feet(EdgeId(0))).abs() < 1e-6);
        }
        other => panic!("wrong summary: {other:?}"),
    }
    // Edges that never led (or lost every slot) drop to the spanning-tree
    // rendering state; e0 keeps its longest-edge slot and never drops.
    let demoted: Vec<EdgeId> = events
        .iter()
        .filter_map(|e| match e {
            StepEvent::EdgeClassified {
                edge,
                role: EdgeRole::SpanningTree,
            } => Some(*edge),
            _ => None,
        })
        .collect();
    assert!(demoted.contains(&EdgeId(1)));
    assert!(demoted.contains(&EdgeId(3)));
    assert!(!demoted.contains(&EdgeId(0)));
}

// -------------------------------------------------------------- convex hull

fn hull_segments(events: &[StepEvent]) -> Vec<(VertexId, VertexId)> {
    match summary(events) {
        RunSummary::Hull { segments } => segments,
        other => panic!("wrong summary: {other:?}"),
    }
}

#[test]
fn hull_of_square_is_its_four_sides() {
    let g = square();
    let (mut d, ev) = ConvexHullDriver::start(&g).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(
        hull_segments(&events),
        vec![
            (VertexId(0), VertexId(1)),
            (VertexId(0), VertexId(3)),
            (VertexId(1), VertexId(2)),
            (VertexId(2), VertexId(3)),
        ]
    );
}

#[test]
fn hull_accepts_collinear_point_between_endpoints_only() {
    // A square plus a midpoint on one side: the full side survives, the
    // half-sides through the midpoint do not.
    let vertices = vec![
        Vertex::new("P0", 0.0, 0.0),
        Vertex::new("P1", 0.0, 2.0),
        Vertex::new("P2", 2.0, 2.0),
        Vertex::new("P3", 2.0, 0.0),
        Vertex::new("P4", 0.0, 1.0),
    ];
    let g = Graph::load(vertices, Vec::new()).unwrap();
    let (mut d, ev) = ConvexHullDriver::start(&g).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(
        hull_segments(&events),
        vec![
            (VertexId(0), VertexId(1)),
            (VertexId(0), VertexId(3)),
            (VertexId(1), VertexId(2)),
            (VertexId(2), VertexId(3)),
        ]
    );
}

/// Andrew's monotone chain over point indices; returns the hull vertex set.
fn monotone_chain_hull(points: &[Vector2<f64>]) -> Vec<usize> {
    fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
        let ab = b - a;
        let ac = c - a;
        ab.x * ac.y - ab.y * ac.x
    }
    let mut idx: Vec<usize> = (0..points.len()).collect();
    idx.sort_by(|&a, &b| {
        points[a]
            .x
            .partial_cmp(&points[b].x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                points[a]
                    .y
                    .partial_cmp(&points[b].y)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
    let mut lower: Vec<usize> = Vec::new();
    for &p in &idx {
        while lower.len() >= 2
            && cross(
                points[lower[lower.len() - 2]],
                points[lower[lower.len() - 1]],
                points[p],
            ) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<usize> = Vec::new();
    for &p in idx.iter().rev() {
        while upper.len() >= 2
            && cross(
                points[upper[upper.len() - 2]],
                points[upper[upper.len() - 1]],
                points[p],
            ) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull.sort_unstable();
    hull
}

#[test]
fn hull_matches_monotone_chain_on_random_points() {
    let mut rng = StdRng::seed_from_u64(2026);
    let vertices: Vec<Vertex> = (0..50)
        .map(|i| {
            Vertex::new(
                format!("R{i}"),
                rng.gen_range(40.0..43.0),
                rng.gen_range(-78.0..-73.0),
            )
        })
        .collect();
    let points: Vec<Vector2<f64>> = vertices.iter().map(|v| v.coords()).collect();
    let g = Graph::load(vertices, Vec::new()).unwrap();
    let (mut d, ev) = ConvexHullDriver::start(&g).unwrap();
    let events = run_to_done(&mut d, ev);
    let segments = hull_segments(&events);

    let reference = monotone_chain_hull(&points);
    let mut endpoints: Vec<usize> = segments
        .iter()
        .flat_map(|&(a, b)| [a.0, b.0])
        .collect();
    endpoints.sort_unstable();
    endpoints.dedup();
    assert_eq!(endpoints, reference);
    // Each hull vertex joins exactly two accepted segments (a closed cycle).
    assert_eq!(segments.len(), reference.len());
}

#[test]
fn hull_with_one_vertex_finishes_immediately() {
    let g = Graph::load(vec![Vertex::new("only", 1.0, 1.0)], Vec::new()).unwrap();
    let (mut d, ev) = ConvexHullDriver::start(&g).unwrap();
    let events = run_to_done(&mut d, ev);
    assert_eq!(
        summary(&events),
        RunSummary::Hull {
            segments: Vec::new()
        }
    );
    assert_eq!(d.step(), Err(StepError::AlreadyDone));
}
