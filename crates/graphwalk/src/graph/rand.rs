//! Random waypoint graphs (reproducible, replay-token seeded).
//!
//! Purpose
//! - Provide deterministic graph samplers for tests and benchmarks. Every
//!   draw is addressed by a `(seed, index)` replay token mixed into a single
//!   RNG, so failures can be replayed exactly.
//!
//! Model
//! - Vertices get uniform coordinates inside a lat/lon bounding box.
//! - In connected mode each vertex beyond the first attaches to a random
//!   earlier vertex (a random tree backbone), then `edge_factor` extra edges
//!   are thrown in. In sparse mode all edges are independent random pairs,
//!   so the result is usually disconnected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{Edge, Graph, Vertex};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(1),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Random graph sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RandomGraphCfg {
    pub vertex_count: VertexCount,
    /// Extra random edges per vertex, on top of the backbone when connected.
    pub edge_factor: f64,
    /// If set, a random tree backbone guarantees a single component.
    pub connected: bool,
    pub lat_range: (f64, f64),
    pub lon_range: (f64, f64),
}

impl Default for RandomGraphCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            edge_factor: 0.8,
            connected: true,
            lat_range: (40.0, 43.0),
            lon_range: (-78.0, -73.0),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random waypoint graph according to `cfg`.
pub fn draw_graph(cfg: RandomGraphCfg, tok: ReplayToken) -> Graph {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let (lat_lo, lat_hi) = cfg.lat_range;
    let (lon_lo, lon_hi) = cfg.lon_range;
    let vertices: Vec<Vertex> = (0..n)
        .map(|i| {
            Vertex::new(
                format!("W{i}"),
                rng.gen_range(lat_lo.min(lat_hi)..=lat_hi.max(lat_lo)),
                rng.gen_range(lon_lo.min(lon_hi)..=lon_hi.max(lon_lo)),
            )
        })
        .collect();

    let mut edges = Vec::new();
    if cfg.connected {
        for i in 1..n {
            let j = rng.gen_range(0..i);
            edges.push(Edge::new(i, j, format!("T{i}")));
        }
    }
    let extra = (n as f64 * cfg.edge_factor).round() as usize;
    if n >= 2 {
        for k in 0..extra {
            let a = rng.gen_range(0..n);
            let mut b = rng.gen_range(0..n);
            if b == a {
                b = (b + 1) % n;
            }
            edges.push(Edge::new(a, b, format!("R{k}")));
        }
    }
    Graph::load(vertices, edges).expect("generated endpoints are in range")
}
