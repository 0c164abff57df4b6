#![cfg_attr(docsrs, feature(doc_cfg))]
//! Core of a side-scrolling platform brawler.
//!
//! The simulation is plain Rust with no engine types: an [`Arena`] owns the
//! static platforms, the [`Player`] and its [`Enemy`] opponents, and
//! [`Arena::step`] advances them one frame from an [`InputSnapshot`] and a
//! clamped time delta. [`plugin::SimulationPlugin`] hosts the arena inside a
//! Bevy app; the `render` feature adds [`presentation`] for a window with
//! sprites, a following camera and an HP label.
pub mod arena;
pub mod body;
pub mod camera;
pub mod clock;
pub mod combat;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod level;
pub mod logging;
pub mod numeric;
pub mod player;
pub mod plugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub use constants::*;

// Re-export commonly used items
pub use arena::{Arena, ArenaError, ArenaSnapshot, CombatEvent, FrameReport, Outcome};
pub use body::{KinematicBody, Motion};
pub use clock::FrameClock;
pub use combat::{Facing, Health, HitMarker, Strike};
pub use config::{ConfigError, Tuning};
pub use enemy::Enemy;
pub use geometry::{Aabb, Platform};
pub use input::{Action, InputSnapshot};
pub use level::{LevelDesc, LevelError};
pub use logging::init as init_logging;
pub use player::Player;
pub use plugin::{Simulation, SimulationPlugin, SimulationSet};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::PresentationPlugin;
