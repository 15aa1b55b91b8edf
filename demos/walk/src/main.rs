//! walk: drives a simulated agent along a precomputed path.
//!
//! ```text
//! walk [path.csv] [follower.json]
//! ```
//!
//! Without arguments the built-in path below is used.  The follower config
//! is read from JSON when given (missing fields take their defaults).  The
//! run is bounded by an external deadline: if the task has not terminated
//! in time it is cancelled, exactly as a supervising planner would.

mod logging;
mod world;

use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use pf_core::{FollowerConfig, Position};
use pf_frames::{Frame, FrameManager};
use pf_movement::{Capabilities, FollowOutcome, PathFollower};
use pf_path::{load_path_csv, load_path_reader};

use world::SimWorld;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64      = 42;
const LATENCY:     Duration = Duration::from_millis(120);
const BUSY_CHANCE: f64      = 0.2;
const DEADLINE:    Duration = Duration::from_secs(30);

// Steps along the road, an item-assisted river crossing, one teleport.
const DEFAULT_PATH_CSV: &str = "\
source,source_x,source_y,destination,destination_x,destination_y,cost\n\
gate,0,0,road,1,0,1\n\
road,1,0,crossroads,2,1,1\n\
crossroads,2,1,riverbank,3,1,2\n\
riverbank,3,1,far_bank,4,1,40\n\
far_bank,4,1,hill,5,2,3\n\
hill,5,2,tower,60,25,500\n\
tower,60,25,courtyard,61,25,1\n\
";

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RunSummary {
    task:            u32,
    edges_total:     usize,
    edges_processed: usize,
    outcome:         String,
    final_position:  Position,
    items_used:      u32,
    elapsed_ms:      u128,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(file) => load_path_csv(std::path::Path::new(&file))
            .with_context(|| format!("loading path from {file}"))?,
        None => load_path_reader(Cursor::new(DEFAULT_PATH_CSV))?,
    };
    let config = match args.next() {
        Some(file) => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading follower config {file}"))?;
            serde_json::from_str::<FollowerConfig>(&text)
                .with_context(|| format!("parsing follower config {file}"))?
        }
        None => FollowerConfig { poll_interval_ms: 50, ..FollowerConfig::default() },
    };

    let start = path.start().map(|n| n.pos).unwrap_or_default();
    let edges_total = path.len();
    info!(
        edges = edges_total,
        total_cost = path.total_cost(),
        %start,
        "path loaded"
    );

    let world = Arc::new(SimWorld::new(start, SEED, LATENCY, BUSY_CHANCE));

    // Position reads come from the map frame; make sure it is showing.
    FrameManager::new(Arc::clone(&world))
        .switch_to(Frame::Map)
        .context("switching to the map frame")?;

    let mut task =
        PathFollower::with_config(path, Capabilities::from_shared(Arc::clone(&world)), config)?;
    let handle = task.handle();

    let started = Instant::now();
    task.start()?;
    if !handle.wait_for_termination(DEADLINE) {
        warn!(deadline = ?DEADLINE, "deadline reached; cancelling");
        handle.cancel();
    }
    let report = task.join()?;
    let elapsed = started.elapsed();

    // Let the last move register before reporting where the agent ended up.
    std::thread::sleep(LATENCY);

    let outcome = match &report.outcome {
        FollowOutcome::Completed => "completed".to_string(),
        FollowOutcome::Canceled(reason) => format!("canceled: {reason}"),
    };
    let summary = RunSummary {
        task:            report.task.0,
        edges_total,
        edges_processed: report.edges_processed,
        outcome,
        final_position:  world.position(),
        items_used:      world.items_used(),
        elapsed_ms:      elapsed.as_millis(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
