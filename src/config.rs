//! Tuning loaded once at startup.
//!
//! Every field has a default taken from [`crate::constants`], so a tuning file
//! only needs the values it changes:
//!
//! ```json
//! { "player": { "speed": 500.0 }, "enemy": { "aggro_range": 300.0 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::BodyTuning;
use crate::constants::*;

/// Failure while loading or validating a tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid tuning JSON.
    #[error("failed to parse tuning file {path}: {source}")]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A value is outside its permitted range.
    #[error("invalid tuning value `{field}` = {value}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

/// Frame clock settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockTuning {
    /// Largest delta integrated in one frame.
    pub max_delta: f32,
}

impl Default for ClockTuning {
    fn default() -> Self {
        Self {
            max_delta: MAX_FRAME_DELTA,
        }
    }
}

/// Player movement and combat constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerTuning {
    /// Walking speed.
    pub speed: f32,
    /// Take-off speed.
    pub jump_speed: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Highest rise while jump is held.
    pub max_jump_height: f32,
    /// Extra push when bumping a ceiling.
    pub bump_impulse: f32,
    /// Starting hit points.
    pub max_hp: u32,
    /// Live time of one swing.
    pub attack_duration: f32,
    /// Window in which the next press advances the combo.
    pub combo_window: f32,
    /// Lockout after the final combo stage.
    pub attack_cooldown: f32,
    /// Damage per connecting swing.
    pub strike_damage: u32,
    /// Knockback speed.
    pub knockback_velocity: f32,
    /// Knockback length.
    pub knockback_duration: f32,
    /// Weapon hitbox width.
    pub weapon_reach: f32,
    /// Weapon hitbox height.
    pub weapon_height: f32,
    /// Time per walk animation frame.
    pub walk_frame_duration: f32,
    /// Body width.
    pub width: f32,
    /// Body height.
    pub height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            gravity: PLAYER_GRAVITY,
            max_jump_height: PLAYER_MAX_JUMP_HEIGHT,
            bump_impulse: BUMP_IMPULSE,
            max_hp: PLAYER_MAX_HP,
            attack_duration: ATTACK_DURATION,
            combo_window: COMBO_WINDOW,
            attack_cooldown: ATTACK_COOLDOWN,
            strike_damage: STRIKE_DAMAGE,
            knockback_velocity: PLAYER_KNOCKBACK_VELOCITY,
            knockback_duration: PLAYER_KNOCKBACK_DURATION,
            weapon_reach: WEAPON_REACH,
            weapon_height: WEAPON_HEIGHT,
            walk_frame_duration: WALK_FRAME_DURATION,
            width: PLAYER_SIZE.0,
            height: PLAYER_SIZE.1,
        }
    }
}

impl PlayerTuning {
    /// Body constants derived from this tuning.
    #[must_use]
    pub const fn body(&self) -> BodyTuning {
        BodyTuning {
            gravity: self.gravity,
            jump_speed: self.jump_speed,
            bump_impulse: self.bump_impulse,
        }
    }
}

/// Enemy behaviour constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyTuning {
    /// Starting hit points.
    pub max_hp: u32,
    /// Patrol speed.
    pub idle_speed: f32,
    /// Time walking one way before turning.
    pub idle_duration: f32,
    /// Half-width of the spotting window.
    pub aggro_range: f32,
    /// Pause between stabs.
    pub stab_cooldown: f32,
    /// Dash speed during a stab.
    pub stab_speed: f32,
    /// Length of one stab.
    pub stab_duration: f32,
    /// Damage dealt on body contact.
    pub contact_damage: u32,
    /// Minimum time between contact hits.
    pub contact_cooldown: f32,
    /// Knockback speed.
    pub knockback_velocity: f32,
    /// Knockback length.
    pub knockback_duration: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Extra push when bumping a ceiling.
    pub bump_impulse: f32,
    /// Body width.
    pub width: f32,
    /// Body height.
    pub height: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_hp: ENEMY_MAX_HP,
            idle_speed: ENEMY_IDLE_SPEED,
            idle_duration: ENEMY_IDLE_DURATION,
            aggro_range: ENEMY_AGGRO_RANGE,
            stab_cooldown: ENEMY_STAB_COOLDOWN,
            stab_speed: ENEMY_STAB_SPEED,
            stab_duration: ENEMY_STAB_DURATION,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            contact_cooldown: ENEMY_CONTACT_COOLDOWN,
            knockback_velocity: ENEMY_KNOCKBACK_VELOCITY,
            knockback_duration: ENEMY_KNOCKBACK_DURATION,
            gravity: ENEMY_GRAVITY,
            bump_impulse: BUMP_IMPULSE,
            width: ENEMY_SIZE.0,
            height: ENEMY_SIZE.1,
        }
    }
}

impl EnemyTuning {
    /// Body constants derived from this tuning. Enemies never jump.
    #[must_use]
    pub const fn body(&self) -> BodyTuning {
        BodyTuning {
            gravity: self.gravity,
            jump_speed: 0.0,
            bump_impulse: self.bump_impulse,
        }
    }
}

/// All tunable constants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Frame clock settings.
    pub clock: ClockTuning,
    /// Player constants.
    pub player: PlayerTuning,
    /// Enemy constants.
    pub enemy: EnemyTuning,
}

impl Tuning {
    /// Reads, parses and validates a tuning file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid
    /// JSON, or contains an out-of-range value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: file.to_path_buf(),
            source,
        })?;
        tuning.validate()?;
        info!("loaded tuning from {}", file.display());
        Ok(tuning)
    }

    /// Parses tuning JSON without validating it.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `text` does not describe a [`Tuning`].
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks every value against its permitted range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        let enemy = &self.enemy;
        let positive = [
            ("clock.max_delta", self.clock.max_delta),
            ("player.speed", player.speed),
            ("player.gravity", player.gravity),
            ("player.attack_duration", player.attack_duration),
            ("player.combo_window", player.combo_window),
            ("player.attack_cooldown", player.attack_cooldown),
            ("player.walk_frame_duration", player.walk_frame_duration),
            ("player.width", player.width),
            ("player.height", player.height),
            ("enemy.idle_duration", enemy.idle_duration),
            ("enemy.stab_duration", enemy.stab_duration),
            ("enemy.gravity", enemy.gravity),
            ("enemy.width", enemy.width),
            ("enemy.height", enemy.height),
        ];
        let non_negative = [
            ("player.jump_speed", player.jump_speed),
            ("player.max_jump_height", player.max_jump_height),
            ("player.bump_impulse", player.bump_impulse),
            ("player.knockback_velocity", player.knockback_velocity),
            ("player.knockback_duration", player.knockback_duration),
            ("player.weapon_reach", player.weapon_reach),
            ("player.weapon_height", player.weapon_height),
            ("enemy.idle_speed", enemy.idle_speed),
            ("enemy.aggro_range", enemy.aggro_range),
            ("enemy.stab_cooldown", enemy.stab_cooldown),
            ("enemy.stab_speed", enemy.stab_speed),
            ("enemy.contact_cooldown", enemy.contact_cooldown),
            ("enemy.knockback_velocity", enemy.knockback_velocity),
            ("enemy.knockback_duration", enemy.knockback_duration),
            ("enemy.bump_impulse", enemy.bump_impulse),
        ];

        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    reason: "must be a finite number greater than zero",
                });
            }
        }
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    reason: "must be a finite, non-negative number",
                });
            }
        }
        if player.max_hp == 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_hp",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if enemy.max_hp == 0 {
            return Err(ConfigError::Invalid {
                field: "enemy.max_hp",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[rstest]
    fn partial_json_keeps_other_defaults() {
        let tuning = Tuning::from_json(r#"{ "player": { "speed": 500.0 } }"#)
            .unwrap_or_else(|e| panic!("valid tuning rejected: {e}"));
        assert_eq!(tuning.player.speed, 500.0);
        assert_eq!(tuning.player.jump_speed, PLAYER_JUMP_SPEED);
        assert_eq!(tuning.enemy, EnemyTuning::default());
    }

    #[rstest]
    fn unknown_fields_are_rejected() {
        assert!(Tuning::from_json(r#"{ "player": { "sped": 500.0 } }"#).is_err());
    }

    #[rstest]
    #[case(r#"{ "clock": { "max_delta": 0.0 } }"#, "clock.max_delta")]
    #[case(r#"{ "player": { "speed": -1.0 } }"#, "player.speed")]
    #[case(r#"{ "enemy": { "aggro_range": -5.0 } }"#, "enemy.aggro_range")]
    #[case(r#"{ "enemy": { "max_hp": 0 } }"#, "enemy.max_hp")]
    fn out_of_range_values_are_named(#[case] json: &str, #[case] expected: &str) {
        let tuning =
            Tuning::from_json(json).unwrap_or_else(|e| panic!("tuning should parse: {e}"));
        match tuning.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }
}
