//! Runs the simulation without a window and prints JSON snapshots.
//!
//! Useful for soak runs and for checking that a tuning or level file behaves
//! as expected: every `--every` frames one line of JSON describing the arena
//! is written to stdout.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;
use skirmish::{
    init_logging, InputSnapshot, LevelDesc, Outcome, Simulation, SimulationPlugin, Tuning,
};

/// Headless skirmish simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Tuning file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level file (JSON)
    #[arg(long)]
    level: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Print a snapshot every N frames
    #[arg(long, default_value_t = 60)]
    every: u64,
    /// Hold move-right for the whole run
    #[arg(long)]
    walk_right: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !(args.dt.is_finite() && args.dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }
    let tuning = match &args.config {
        Some(path) => Tuning::load(path).with_context(|| "loading tuning")?,
        None => Tuning::default(),
    };
    let level = match &args.level {
        Some(path) => LevelDesc::load(path).with_context(|| "loading level")?,
        None => LevelDesc::default(),
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            args.dt,
        )))
        .add_plugins(SimulationPlugin::new(level, tuning));
    if !app.world().contains_resource::<Simulation>() {
        bail!("simulation failed to initialise; see the log for details");
    }

    let input = InputSnapshot {
        move_right: args.walk_right,
        ..InputSnapshot::default()
    };
    app.world_mut().resource_mut::<Simulation>().set_input(input);

    let every = args.every.max(1);
    let mut out = io::stdout().lock();
    for frame in 1..=args.frames {
        app.update();
        let simulation = app.world().resource::<Simulation>();
        let snapshot = simulation.arena().snapshot();
        let finished = snapshot.outcome != Outcome::Ongoing;
        if frame % every == 0 || finished {
            let line = serde_json::to_string(&snapshot).context("serialising snapshot")?;
            writeln!(out, "{line}").context("writing snapshot")?;
        }
        if finished {
            info!("session ended with {:?} after {frame} frames", snapshot.outcome);
            break;
        }
    }
    Ok(())
}
