//! Walk a tiny square graph and print every step event.
//!
//! Usage:
//!   cargo run -p graphwalk --example square_walk -- bfs
//!   cargo run -p graphwalk --example square_walk -- dfs
//!   cargo run -p graphwalk --example square_walk -- dijkstra

use graphwalk::engine::{Algorithm, RunContext, Scheduler, Tick};
use graphwalk::frontier::Discipline;
use graphwalk::graph::{Edge, Graph, Vertex, VertexId};

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "bfs".to_string());
    let algorithm = match mode.as_str() {
        "bfs" => Algorithm::Traversal(Discipline::Queue),
        "dfs" => Algorithm::Traversal(Discipline::Stack),
        "dijkstra" => Algorithm::ShortestPath,
        _ => {
            eprintln!("usage: square_walk [bfs|dfs|dijkstra]");
            return;
        }
    };

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
    let graph = Graph::load(vertices, edges).expect("square graph is valid");

    let mut ctx = RunContext::new(algorithm, VertexId(0));
    if mode == "dijkstra" {
        ctx.end = Some(VertexId(2));
    }

    let mut scheduler = Scheduler::new(&graph);
    let initial = scheduler.start(&ctx).expect("valid run context");
    for ev in &initial {
        println!("start: {ev:?}");
    }
    let mut step = 0;
    loop {
        step += 1;
        match scheduler.tick().expect("run does not fail") {
            Tick::Stepped(events) => {
                for ev in &events {
                    println!("step {step}: {ev:?}");
                }
            }
            Tick::Finished(events) => {
                for ev in &events {
                    println!("final: {ev:?}");
                }
                break;
            }
            Tick::Paused | Tick::Idle => break,
        }
    }
}
