use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

use graphwalk::engine::{Algorithm, RunContext, RunSummary, Scheduler, StepEvent, Tick};
use graphwalk::frontier::Discipline;
use graphwalk::graph::VertexId;

mod input;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Step graph algorithms over a waypoint graph")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run one algorithm to completion and report its events
    Run {
        /// Graph JSON file
        #[arg(long)]
        input: String,
        /// bfs | dfs | rfs | components | dijkstra | vertex-extremes |
        /// edge-extremes | hull
        #[arg(long)]
        algo: String,
        #[arg(long, default_value_t = 0)]
        start: usize,
        #[arg(long)]
        end: Option<usize>,
        /// Delay between ticks in milliseconds
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Seed for the random-pick discipline
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Write the full event stream as JSON here
        #[arg(long)]
        out: Option<String>,
    },
    /// Print vertex/edge counts for a graph file
    Info {
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            algo,
            start,
            end,
            delay_ms,
            seed,
            out,
        } => run(input, algo, start, end, delay_ms, seed, out),
        Action::Info { input } => info(input),
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm> {
    Ok(match name {
        "bfs" => Algorithm::Traversal(Discipline::Queue),
        "dfs" => Algorithm::Traversal(Discipline::Stack),
        "rfs" => Algorithm::Traversal(Discipline::RandomPick),
        "components" => Algorithm::ConnectedComponents,
        "dijkstra" => Algorithm::ShortestPath,
        "vertex-extremes" => Algorithm::ExtremeVertexScan,
        "edge-extremes" => Algorithm::ExtremeEdgeScan,
        "hull" => Algorithm::ConvexHull,
        other => bail!("unknown algorithm {other:?}"),
    })
}

fn run(
    input: String,
    algo: String,
    start: usize,
    end: Option<usize>,
    delay_ms: u64,
    seed: u64,
    out: Option<String>,
) -> Result<()> {
    let graph = input::load_graph(&input)?;
    let algorithm = parse_algorithm(&algo)?;
    let mut ctx = RunContext::new(algorithm, VertexId(start));
    ctx.end = end.map(VertexId);
    ctx.delay_ms = delay_ms;
    ctx.seed = seed;

    tracing::info!(
        algo,
        start = input::describe_vertex(&graph, ctx.start),
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        "run"
    );

    let mut scheduler = Scheduler::new(&graph);
    let mut events = scheduler.start(&ctx)?;
    let mut steps = 0usize;
    let summary = loop {
        match scheduler.tick()? {
            Tick::Stepped(ev) => {
                steps += 1;
                events.extend(ev);
                if !scheduler.delay().is_zero() {
                    std::thread::sleep(scheduler.delay());
                }
            }
            Tick::Finished(ev) => {
                steps += 1;
                events.extend(ev);
                break events.iter().rev().find_map(|e| match e {
                    StepEvent::RunFinished { summary } => Some(summary.clone()),
                    _ => None,
                });
            }
            Tick::Paused | Tick::Idle => break None,
        }
    };
    tracing::info!(steps, events = events.len(), "run complete");

    if let Some(out) = out {
        let doc: Vec<_> = events.iter().map(event_json).collect();
        let out_path = Path::new(&out);
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(out_path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {out}"))?;
    }

    match summary {
        Some(summary) => println!("{}", serde_json::to_string_pretty(&summary_json(&summary))?),
        None => bail!("run ended without a summary"),
    }
    Ok(())
}

fn info(input: String) -> Result<()> {
    let graph = input::load_graph(&input)?;
    let hidden = graph.vertices().iter().filter(|v| !v.visible).count();
    let doc = json!({
        "vertices": graph.num_vertices(),
        "hidden_vertices": hidden,
        "edges": graph.num_edges(),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn event_json(event: &StepEvent) -> serde_json::Value {
    match event {
        StepEvent::VertexClassified { vertex, role } => json!({
            "kind": "vertex",
            "vertex": vertex.0,
            "role": format!("{role:?}"),
        }),
        StepEvent::EdgeClassified { edge, role } => json!({
            "kind": "edge",
            "edge": edge.0,
            "role": format!("{role:?}"),
        }),
        StepEvent::FrontierSnapshot {
            vertices,
            distances,
        } => json!({
            "kind": "frontier",
            "vertices": vertices.iter().map(|v| v.0).collect::<Vec<_>>(),
            "distances": distances,
        }),
        StepEvent::HullSegment { from, to, accepted } => json!({
            "kind": "hull_segment",
            "from": from.0,
            "to": to.0,
            "accepted": accepted,
        }),
        StepEvent::ComponentStarted { index, start } => json!({
            "kind": "component_started",
            "index": index,
            "start": start.0,
        }),
        StepEvent::RunFinished { summary } => json!({
            "kind": "run_finished",
            "summary": summary_json(summary),
        }),
    }
}

fn summary_json(summary: &RunSummary) -> serde_json::Value {
    match summary {
        RunSummary::Traversal {
            num_visited,
            num_visited_coming_out,
            num_already_visited,
        } => json!({
            "algorithm": "traversal",
            "num_visited": num_visited,
            "num_visited_coming_out": num_visited_coming_out,
            "num_already_visited": num_already_visited,
        }),
        RunSummary::Components { count } => json!({
            "algorithm": "components",
            "count": count,
        }),
        RunSummary::ShortestPath { path, total_miles } => json!({
            "algorithm": "shortest_path",
            "path": path.iter().map(|e| e.0).collect::<Vec<_>>(),
            "total_miles": total_miles,
        }),
        RunSummary::ExtremeVertices { leaders } => json!({
            "algorithm": "vertex_extremes",
            "north": leaders.north.0,
            "south": leaders.south.0,
            "east": leaders.east.0,
            "west": leaders.west.0,
            "short_label": leaders.short_label.0,
            "long_label": leaders.long_label.0,
        }),
        RunSummary::ExtremeEdges { leaders } => json!({
            "algorithm": "edge_extremes",
            "shortest": leaders.shortest.map(|e| e.0),
            "longest": leaders.longest.map(|e| e.0),
            "short_label": leaders.short_label.map(|e| e.0),
            "long_label": leaders.long_label.map(|e| e.0),
            "min_feet": leaders.min_feet,
            "max_feet": leaders.max_feet,
        }),
        RunSummary::Hull { segments } => json!({
            "algorithm": "hull",
            "segments": segments.iter().map(|(a, b)| [a.0, b.0]).collect::<Vec<_>>(),
        }),
    }
}
