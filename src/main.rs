//! Windowed skirmish client.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use skirmish::numeric::extent_to_u32;
use skirmish::{
    init_logging, LevelDesc, PresentationPlugin, SimulationPlugin, Tuning, VIEWPORT_HEIGHT,
    VIEWPORT_WIDTH,
};

/// A side-scrolling platform brawler
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
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match &args.config {
        Some(path) => Tuning::load(path).with_context(|| "loading tuning")?,
        None => Tuning::default(),
    };
    let level = match &args.level {
        Some(path) => LevelDesc::load(path).with_context(|| "loading level")?,
        None => LevelDesc::default(),
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Skirmish".to_owned(),
                        resolution: (
                            extent_to_u32(VIEWPORT_WIDTH),
                            extent_to_u32(VIEWPORT_HEIGHT),
                        )
                            .into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(SimulationPlugin::new(level, tuning))
        .add_plugins(PresentationPlugin)
        .run();
    Ok(())
}
