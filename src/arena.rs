//! The arena owns the level and every combatant and advances them together.
//!
//! One call to [`Arena::step`] is one frame:
//!
//! 1. the player reads its input (movement, jump, combo, guard),
//! 2. each enemy runs its AI against the player's current bounds,
//! 3. every body integrates, resolves against the platforms, then falls,
//! 4. damage is arbitrated between the player's swing and each enemy.
//!
//! Nothing advances once the player is dead.

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::body::Motion;
use crate::combat::{Facing, HealthChange, HitOutcome};
use crate::config::{ConfigError, Tuning};
use crate::enemy::{Enemy, Opponent};
use crate::geometry::{Aabb, Platform};
use crate::input::InputSnapshot;
use crate::level::{LevelDesc, LevelError};
use crate::player::Player;

/// Failure while building an arena.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// The level is unusable.
    #[error(transparent)]
    Level(#[from] LevelError),
    /// The tuning is out of range.
    #[error(transparent)]
    Tuning(#[from] ConfigError),
}

/// Something that happened during damage arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    /// The player's swing landed on an enemy.
    EnemyHit {
        /// Index of the enemy.
        enemy: usize,
        /// Combo stage of the swing.
        stage: u8,
        /// Enemy hit points left.
        remaining: u32,
    },
    /// An enemy's contact damage landed on the player.
    PlayerHit {
        /// Index of the enemy.
        enemy: usize,
        /// Player hit points left.
        remaining: u32,
    },
    /// The player's guard absorbed an enemy's contact damage.
    PlayerBlocked {
        /// Index of the enemy.
        enemy: usize,
    },
    /// An enemy's hit points reached zero.
    EnemyDefeated {
        /// Index of the enemy.
        enemy: usize,
    },
    /// The player's hit points reached zero.
    PlayerDefeated,
}

/// Events produced by one [`Arena::step`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FrameReport {
    /// Number of the frame, starting at 1. Stays put once the player is dead.
    pub frame: u64,
    /// Combat events in the order they happened.
    pub events: Vec<CombatEvent>,
}

/// How the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Still fighting.
    Ongoing,
    /// Every enemy is dead.
    Victory,
    /// The player is dead.
    Defeat,
}

/// Read-only view of the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    /// Body bounds.
    pub bounds: Aabb,
    /// Weapon hitbox while swinging.
    pub weapon: Option<Aabb>,
    /// Hit points left.
    pub hp: u32,
    /// Facing.
    pub facing: Facing,
    /// Vertical movement state.
    pub motion: Motion,
    /// Current combo stage.
    pub combo_stage: u8,
    /// Whether the guard is up.
    pub guarding: bool,
    /// Walk animation frame.
    pub walk_frame: u8,
}

/// Read-only view of one enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyView {
    /// Body bounds.
    pub bounds: Aabb,
    /// Hit points left.
    pub hp: u32,
    /// Facing.
    pub facing: Facing,
    /// Whether the enemy has spotted the player.
    pub aggro: bool,
    /// Whether the enemy is mid-stab.
    pub stabbing: bool,
}

/// Everything a renderer or a log needs to know about one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArenaSnapshot {
    /// Frame number.
    pub frame: u64,
    /// Session outcome.
    pub outcome: Outcome,
    /// The player.
    pub player: PlayerView,
    /// Enemies still alive, with their spawn index.
    pub enemies: Vec<(usize, EnemyView)>,
}

/// The level and its combatants.
#[derive(Debug, Clone)]
pub struct Arena {
    platforms: Vec<Platform>,
    player: Player,
    enemies: Vec<Enemy>,
    frame: u64,
}

impl Arena {
    /// Assembles an arena from already-built parts.
    #[must_use]
    pub const fn new(platforms: Vec<Platform>, player: Player, enemies: Vec<Enemy>) -> Self {
        Self {
            platforms,
            player,
            enemies,
            frame: 0,
        }
    }

    /// Builds an arena from a level description.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError`] if the level or the tuning fails validation.
    pub fn from_level(level: &LevelDesc, tuning: &Tuning) -> Result<Self, ArenaError> {
        level.validate()?;
        tuning.validate()?;
        let player = Player::new(level.player_spawn, tuning.player);
        let enemies = level
            .enemy_spawns
            .iter()
            .map(|spawn| Enemy::new(*spawn, tuning.enemy))
            .collect::<Vec<_>>();
        info!(
            "arena ready: {} platforms, {} enemies",
            level.platforms.len(),
            enemies.len()
        );
        Ok(Self::new(level.platforms.clone(), player, enemies))
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32, input: &InputSnapshot) -> FrameReport {
        if self.player.is_dead() {
            return FrameReport {
                frame: self.frame,
                events: Vec::new(),
            };
        }
        self.frame += 1;

        self.player.think(dt, input);
        let opponent = Opponent::new(self.player.bounds());
        for enemy in &mut self.enemies {
            enemy.think(dt, &opponent);
        }

        self.player.integrate(dt);
        for enemy in &mut self.enemies {
            enemy.integrate(dt);
        }
        self.player.resolve(&self.platforms, dt);
        for enemy in &mut self.enemies {
            enemy.resolve(&self.platforms, dt);
        }
        self.player.apply_gravity(dt);
        for enemy in &mut self.enemies {
            enemy.apply_gravity(dt);
        }

        let mut events = Vec::new();
        self.arbitrate(&mut events);
        FrameReport {
            frame: self.frame,
            events,
        }
    }

    fn arbitrate(&mut self, events: &mut Vec<CombatEvent>) {
        let active = self.player.active_strike();
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if enemy.is_dead() {
                continue;
            }

            if let Some(strike) = active {
                if enemy.receive_strike(&strike) {
                    events.push(CombatEvent::EnemyHit {
                        enemy: index,
                        stage: strike.stage,
                        remaining: enemy.hp(),
                    });
                    if enemy.is_dead() {
                        info!("enemy {index} defeated on frame {}", self.frame);
                        events.push(CombatEvent::EnemyDefeated { enemy: index });
                        continue;
                    }
                }
            } else {
                enemy.rearm_marker();
            }

            let opponent = Opponent::new(self.player.bounds());
            let Some(damage) = enemy.try_contact(&opponent) else {
                continue;
            };
            match self.player.receive_melee(damage, enemy.position().x) {
                HitOutcome::Blocked => events.push(CombatEvent::PlayerBlocked { enemy: index }),
                HitOutcome::Damaged(HealthChange::Wounded { remaining }) => {
                    debug!("enemy {index} hit the player, {remaining} hp left");
                    events.push(CombatEvent::PlayerHit {
                        enemy: index,
                        remaining,
                    });
                }
                HitOutcome::Damaged(HealthChange::Killed) => {
                    info!("player defeated on frame {}", self.frame);
                    events.push(CombatEvent::PlayerHit {
                        enemy: index,
                        remaining: 0,
                    });
                    events.push(CombatEvent::PlayerDefeated);
                    return;
                }
                HitOutcome::Damaged(HealthChange::AlreadyDead) | HitOutcome::Ignored => return,
            }
        }
    }

    /// How the session stands. An arena without enemies never reaches
    /// [`Outcome::Victory`].
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.player.is_dead() {
            Outcome::Defeat
        } else if !self.enemies.is_empty() && self.enemies.iter().all(Enemy::is_dead) {
            Outcome::Victory
        } else {
            Outcome::Ongoing
        }
    }

    /// Captures a read-only view of the current frame.
    #[must_use]
    pub fn snapshot(&self) -> ArenaSnapshot {
        let player = &self.player;
        ArenaSnapshot {
            frame: self.frame,
            outcome: self.outcome(),
            player: PlayerView {
                bounds: player.bounds(),
                weapon: player.weapon_hitbox(),
                hp: player.hp(),
                facing: player.facing(),
                motion: player.motion(),
                combo_stage: player.combo_stage(),
                guarding: player.is_guarding(),
                walk_frame: player.walk_frame(),
            },
            enemies: self
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, enemy)| !enemy.is_dead())
                .map(|(index, enemy)| {
                    (
                        index,
                        EnemyView {
                            bounds: enemy.bounds(),
                            hp: enemy.hp(),
                            facing: enemy.facing(),
                            aggro: enemy.is_aggro(),
                            stabbing: enemy.is_stabbing(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Static level geometry.
    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// All enemies, dead ones included, in spawn order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Frames stepped so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }
}
