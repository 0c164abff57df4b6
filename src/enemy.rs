//! Enemy AI: patrol until the opponent comes close, then fight.
//!
//! Spotting the opponent is permanent. After that the enemy alternates
//! between standing in stance and a short dash toward the opponent, and
//! deals contact damage on a cooldown while their bodies overlap. Both only
//! happen while the opponent is within aggro range; outside it the enemy
//! holds its ground.

use glam::Vec2;
use log::{debug, info};

use crate::body::{Contact, KinematicBody, Motion};
use crate::combat::{Facing, Health, HealthChange, HitMarker, Knockback, Strike};
use crate::config::EnemyTuning;
use crate::geometry::{Aabb, Platform};

/// Where the stab cycle is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabPhase {
    /// Waiting for the stab cooldown.
    Stance {
        /// Time spent in stance.
        elapsed: f32,
    },
    /// Dashing toward the opponent.
    Stabbing {
        /// Time spent dashing.
        elapsed: f32,
    },
}

/// Top-level behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behaviour {
    /// Walking back and forth on a timer.
    Patrol {
        /// Current walking direction.
        heading: Facing,
        /// Time since the last turn.
        elapsed: f32,
    },
    /// Opponent spotted.
    Aggro {
        /// Stab cycle state.
        stab: StabPhase,
    },
}

impl Behaviour {
    /// `true` once the opponent has been spotted.
    #[must_use]
    pub const fn is_aggro(&self) -> bool {
        matches!(self, Self::Aggro { .. })
    }
}

/// What an enemy can see of its opponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opponent {
    /// Opponent's body bounds.
    pub bounds: Aabb,
}

impl Opponent {
    /// Wraps the opponent's bounds.
    #[must_use]
    pub const fn new(bounds: Aabb) -> Self {
        Self { bounds }
    }

    /// Horizontal position of the opponent's left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.bounds.x
    }
}

/// An AI-controlled combatant.
#[derive(Debug, Clone)]
pub struct Enemy {
    body: KinematicBody,
    health: Health,
    facing: Facing,
    knockback: Knockback,
    behaviour: Behaviour,
    marker: HitMarker,
    since_contact: f32,
    tuning: EnemyTuning,
}

impl Enemy {
    /// Spawns an enemy with its top-left corner at `position`, patrolling
    /// to the left.
    #[must_use]
    pub fn new(position: Vec2, tuning: EnemyTuning) -> Self {
        Self {
            body: KinematicBody::new(
                position,
                Vec2::new(tuning.width, tuning.height),
                tuning.body(),
            ),
            health: Health::new(tuning.max_hp),
            facing: Facing::Left,
            knockback: Knockback::default(),
            behaviour: Behaviour::Patrol {
                heading: Facing::Left,
                elapsed: 0.0,
            },
            marker: HitMarker::default(),
            since_contact: 0.0,
            tuning,
        }
    }

    /// Runs one frame of AI. Does nothing once dead.
    pub fn think(&mut self, dt: f32, opponent: &Opponent) {
        if self.is_dead() {
            return;
        }
        self.since_contact += dt;
        self.knockback.tick(dt);

        let in_range = self.in_range(opponent.x());
        if in_range && !self.behaviour.is_aggro() {
            debug!(
                "enemy at x={} spotted opponent at x={}",
                self.body.position().x,
                opponent.x()
            );
            self.behaviour = Behaviour::Aggro {
                stab: StabPhase::Stance { elapsed: 0.0 },
            };
        }

        let intent = match self.behaviour {
            Behaviour::Patrol { .. } => self.patrol(dt),
            Behaviour::Aggro { .. } if in_range => self.advance_stab(dt, opponent.x()),
            Behaviour::Aggro { .. } => 0.0,
        };
        if intent < 0.0 {
            self.facing = Facing::Left;
        } else if intent > 0.0 {
            self.facing = Facing::Right;
        }

        let vx = self
            .knockback
            .velocity(self.tuning.knockback_velocity)
            .unwrap_or(intent);
        self.body.set_horizontal_velocity(vx);
    }

    const fn patrol(&mut self, dt: f32) -> f32 {
        let Behaviour::Patrol { heading, elapsed } = &mut self.behaviour else {
            return 0.0;
        };
        let vx = heading.sign() * self.tuning.idle_speed;
        *elapsed += dt;
        if *elapsed >= self.tuning.idle_duration {
            *elapsed -= self.tuning.idle_duration;
            *heading = match heading {
                Facing::Left => Facing::Right,
                Facing::Right => Facing::Left,
            };
        }
        vx
    }

    const fn advance_stab(&mut self, dt: f32, target_x: f32) -> f32 {
        let Behaviour::Aggro { stab } = &mut self.behaviour else {
            return 0.0;
        };
        let dashing = match *stab {
            StabPhase::Stance { elapsed } => {
                let waited = elapsed + dt;
                if waited >= self.tuning.stab_cooldown {
                    *stab = StabPhase::Stabbing { elapsed: 0.0 };
                    true
                } else {
                    *stab = StabPhase::Stance { elapsed: waited };
                    false
                }
            }
            StabPhase::Stabbing { elapsed } => {
                let dashed = elapsed + dt;
                *stab = if dashed >= self.tuning.stab_duration {
                    StabPhase::Stance { elapsed: 0.0 }
                } else {
                    StabPhase::Stabbing { elapsed: dashed }
                };
                true
            }
        };
        if !dashing {
            return 0.0;
        }
        let x = self.body.position().x;
        if target_x > x {
            self.tuning.stab_speed
        } else if target_x < x {
            -self.tuning.stab_speed
        } else {
            0.0
        }
    }

    const fn in_range(&self, target_x: f32) -> bool {
        let x = self.body.position().x;
        target_x > x - self.tuning.aggro_range && target_x < x + self.tuning.aggro_range
    }

    /// Moves the body by its velocity.
    pub fn integrate(&mut self, dt: f32) {
        if !self.is_dead() {
            self.body.integrate(dt);
        }
    }

    /// Resolves collisions with the level.
    pub fn resolve(&mut self, platforms: &[Platform], dt: f32) -> Contact {
        if self.is_dead() {
            return Contact::default();
        }
        self.body.resolve(platforms, dt)
    }

    /// Applies gravity while falling.
    pub fn apply_gravity(&mut self, dt: f32) {
        if !self.is_dead() {
            self.body.apply_gravity(dt);
        }
    }

    /// Returns the contact damage to deal this frame, if any.
    ///
    /// Contact damage needs aggro, the opponent in range, overlapping
    /// bodies and an elapsed contact cooldown. The cooldown restarts whenever
    /// damage is returned, whether or not the opponent then blocks it.
    pub const fn try_contact(&mut self, opponent: &Opponent) -> Option<u32> {
        if self.is_dead() || !self.behaviour.is_aggro() || !self.in_range(opponent.x()) {
            return None;
        }
        if !self.bounds().intersects(&opponent.bounds)
            || self.since_contact < self.tuning.contact_cooldown
        {
            return None;
        }
        self.since_contact = 0.0;
        Some(self.tuning.contact_damage)
    }

    /// Applies `strike` if it connects and its stage has not already hit.
    /// Returns `true` when damage was dealt.
    pub fn receive_strike(&mut self, strike: &Strike) -> bool {
        if self.is_dead() || !self.marker.register(strike, &self.bounds()) {
            return false;
        }
        let change = self.take_damage(strike.damage, strike.source_x);
        info!("enemy hit by combo stage {}: {change:?}", strike.stage);
        true
    }

    /// Re-arms the hit marker; called while the attacker is not swinging.
    pub const fn rearm_marker(&mut self) {
        self.marker.rearm();
    }

    /// Subtracts hit points and starts knockback away from `source_x`.
    pub fn take_damage(&mut self, amount: u32, source_x: f32) -> HealthChange {
        let change = self.health.take(amount);
        match change {
            HealthChange::AlreadyDead => {}
            HealthChange::Killed => {
                self.body.set_horizontal_velocity(0.0);
                debug!("enemy at x={} died", self.body.position().x);
            }
            HealthChange::Wounded { .. } => {
                self.knockback.start(
                    source_x,
                    self.body.position().x,
                    self.tuning.knockback_duration,
                );
            }
        }
        change
    }

    /// The enemy's body.
    #[must_use]
    pub const fn body(&self) -> &KinematicBody {
        &self.body
    }

    /// Body bounds.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    /// Vertical movement state.
    #[must_use]
    pub const fn motion(&self) -> Motion {
        self.body.motion()
    }

    /// Hit points left.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.health.current()
    }

    /// `true` once hit points reached zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Direction of the last movement.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Current behaviour.
    #[must_use]
    pub const fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    /// `true` once the opponent has been spotted.
    #[must_use]
    pub const fn is_aggro(&self) -> bool {
        self.behaviour.is_aggro()
    }

    /// `true` during a stab dash.
    #[must_use]
    pub const fn is_stabbing(&self) -> bool {
        matches!(
            self.behaviour,
            Behaviour::Aggro {
                stab: StabPhase::Stabbing { .. }
            }
        )
    }

    /// Knockback state.
    #[must_use]
    pub const fn knockback(&self) -> &Knockback {
        &self.knockback
    }
}
