//! Level layout: static platforms and spawn points.
//!
//! A level is read once before the simulation starts and never changes
//! afterwards. Levels are JSON files:
//!
//! ```json
//! {
//!   "platforms": [{ "x": 0, "y": 700, "w": 3000, "h": 10 }],
//!   "player_spawn": [375, 250],
//!   "enemy_spawns": [[1800, 650]]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Aabb, Platform};

/// Failure while loading or validating a level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The file could not be read.
    #[error("failed to read level file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid level JSON.
    #[error("failed to parse level file {path}: {source}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The level has nothing to stand on.
    #[error("level has no platforms")]
    NoPlatforms,
    /// A platform has a negative or non-finite extent.
    #[error("platform {index} is malformed: {bounds:?}")]
    MalformedPlatform {
        /// Position in the platform list.
        index: usize,
        /// The rejected bounds.
        bounds: Aabb,
    },
    /// A spawn point is not finite.
    #[error("spawn point {what} is not finite: {point}")]
    NonFiniteSpawn {
        /// Which spawn point.
        what: String,
        /// The rejected point.
        point: Vec2,
    },
}

/// Platforms and spawn points of one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelDesc {
    /// Static collision geometry, resolved in list order.
    pub platforms: Vec<Platform>,
    /// Top-left corner of the player at start.
    pub player_spawn: Vec2,
    /// Top-left corners of the enemies at start.
    #[serde(default)]
    pub enemy_spawns: Vec<Vec2>,
}

impl Default for LevelDesc {
    /// The built-in level: a long floor, a ledge, a wall low enough to jump
    /// and one enemy standing beyond it.
    fn default() -> Self {
        Self {
            platforms: vec![
                Platform::new(Aabb::new(0.0, 700.0, 3000.0, 10.0)),
                Platform::new(Aabb::new(500.0, 440.0, 300.0, 100.0)),
                Platform::new(Aabb::new(1050.0, 560.0, 100.0, 140.0)),
            ],
            player_spawn: Vec2::new(375.0, 250.0),
            enemy_spawns: vec![Vec2::new(1800.0, 650.0)],
        }
    }
}

impl LevelDesc {
    /// Reads, parses and validates a level file.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] if the file cannot be read, is not valid JSON,
    /// or describes an unusable level.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| LevelError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let level: Self = serde_json::from_str(&text).map_err(|source| LevelError::Parse {
            path: file.to_path_buf(),
            source,
        })?;
        level.validate()?;
        info!(
            "loaded level {} ({} platforms, {} enemies)",
            file.display(),
            level.platforms.len(),
            level.enemy_spawns.len()
        );
        Ok(level)
    }

    /// Checks that the level can be simulated.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        if let Some((index, platform)) = self
            .platforms
            .iter()
            .enumerate()
            .find(|(_, platform)| !platform.bounds().is_well_formed())
        {
            return Err(LevelError::MalformedPlatform {
                index,
                bounds: *platform.bounds(),
            });
        }
        if !self.player_spawn.is_finite() {
            return Err(LevelError::NonFiniteSpawn {
                what: "player".to_owned(),
                point: self.player_spawn,
            });
        }
        if let Some((index, point)) = self
            .enemy_spawns
            .iter()
            .enumerate()
            .find(|(_, point)| !point.is_finite())
        {
            return Err(LevelError::NonFiniteSpawn {
                what: format!("enemy {index}"),
                point: *point,
            });
        }
        Ok(())
    }
}
