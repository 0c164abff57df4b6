//! The player-controlled combatant.
//!
//! Each frame [`Player::think`] turns the input snapshot into intent: walk
//! velocity, facing, jump start and extension, combo progression, guard. The
//! arena then integrates and resolves the body and arbitrates damage against
//! the player's [`Player::active_strike`].
//!
//! The attack logic is a small state machine instead of a handful of
//! independent flags:
//!
//! - [`Combo`] counts presses inside the combo window (stages `1..=3`),
//! - a [`Swing`] exists only while a hitbox is live,
//! - [`AttackGate`] locks attacking out for a cooldown after the final stage.

use glam::Vec2;
use log::debug;

use crate::body::{Contact, KinematicBody, Motion};
use crate::combat::{Facing, Health, HealthChange, HitOutcome, Knockback, Strike};
use crate::config::PlayerTuning;
use crate::geometry::{Aabb, Platform};
use crate::input::{Action, InputFrame, InputSnapshot};
use crate::{MAX_COMBO_STAGE, WALK_FRAMES};

/// Combo progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Combo {
    /// Current stage, `0` when no combo is running.
    pub stage: u8,
    /// Time left to press again and advance.
    pub window: f32,
}

/// A live swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    /// Side the weapon is swung toward.
    pub facing: Facing,
    /// Time before the hitbox closes.
    pub remaining: f32,
}

/// Whether a new swing may start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AttackGate {
    /// Attacking is allowed.
    #[default]
    Ready,
    /// Locked out after the final combo stage.
    Cooling {
        /// Time until attacking is allowed again.
        remaining: f32,
    },
}

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    body: KinematicBody,
    health: Health,
    facing: Facing,
    knockback: Knockback,
    combo: Combo,
    swing: Option<Swing>,
    gate: AttackGate,
    guarding: bool,
    walking: bool,
    walk_frame: u8,
    walk_elapsed: f32,
    previous_input: InputSnapshot,
    tuning: PlayerTuning,
}

impl Player {
    /// Spawns a player with its top-left corner at `position`.
    #[must_use]
    pub fn new(position: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            body: KinematicBody::new(
                position,
                Vec2::new(tuning.width, tuning.height),
                tuning.body(),
            ),
            health: Health::new(tuning.max_hp),
            facing: Facing::Right,
            knockback: Knockback::default(),
            combo: Combo::default(),
            swing: None,
            gate: AttackGate::Ready,
            guarding: false,
            walking: false,
            walk_frame: 1,
            walk_elapsed: 0.0,
            previous_input: InputSnapshot::default(),
            tuning,
        }
    }

    /// Runs one frame of input handling and timer decay.
    ///
    /// Does nothing once the player is dead.
    pub fn think(&mut self, dt: f32, input: &InputSnapshot) {
        if self.is_dead() {
            return;
        }
        let frame = InputFrame::new(*input, self.previous_input);

        self.decay_timers(dt);
        self.steer(&frame);
        self.handle_jump(&frame, dt);
        if frame.just_pressed(Action::Attack) {
            self.press_attack();
        }
        self.update_guard(&frame);
        self.animate_walk(dt);

        self.previous_input = *input;
    }

    fn decay_timers(&mut self, dt: f32) {
        self.knockback.tick(dt);

        if let Some(swing) = self.swing.as_mut() {
            swing.remaining -= dt;
            if swing.remaining <= 0.0 {
                self.swing = None;
            }
        }

        if self.combo.stage > 0 {
            self.combo.window -= dt;
            if self.combo.window <= 0.0 {
                self.combo = Combo::default();
            }
        }

        if let AttackGate::Cooling { remaining } = &mut self.gate {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.gate = AttackGate::Ready;
                self.combo.stage = 0;
                debug!("player attack cooldown finished");
            }
        }
    }

    fn steer(&mut self, frame: &InputFrame) {
        let intent = frame.current.horizontal();
        if intent < 0.0 {
            self.facing = Facing::Left;
        } else if intent > 0.0 {
            self.facing = Facing::Right;
        }
        self.walking = intent != 0.0;

        let vx = self
            .knockback
            .velocity(self.tuning.knockback_velocity)
            .unwrap_or(intent * self.tuning.speed);
        self.body.set_horizontal_velocity(vx);
    }

    fn handle_jump(&mut self, frame: &InputFrame, dt: f32) {
        if frame.just_pressed(Action::Jump) && self.body.begin_jump() {
            debug!("player jumped from y={}", self.body.position().y);
        }
        self.body
            .sustain_jump(frame.held(Action::Jump), self.tuning.max_jump_height, dt);
    }

    /// Handles an attack press (rising edge).
    fn press_attack(&mut self) {
        if let AttackGate::Cooling { .. } = self.gate {
            if self.combo.stage == MAX_COMBO_STAGE && self.combo.window > 0.0 {
                debug!("attack pressed past the final combo stage; combo reset");
                self.reset_combo();
            }
            return;
        }

        let next_stage = if self.combo.stage == 0 || self.combo.window <= 0.0 {
            1
        } else if self.body.motion().is_airborne() {
            self.combo.stage
        } else {
            self.combo.stage + 1
        };

        if next_stage > MAX_COMBO_STAGE {
            self.reset_combo();
            return;
        }

        self.combo = Combo {
            stage: next_stage,
            window: self.tuning.combo_window,
        };
        self.swing = Some(Swing {
            facing: self.facing,
            remaining: self.tuning.attack_duration,
        });
        debug!("player swing stage {next_stage} facing {:?}", self.facing);

        if next_stage == MAX_COMBO_STAGE {
            self.gate = AttackGate::Cooling {
                remaining: self.tuning.attack_cooldown,
            };
        }
    }

    fn reset_combo(&mut self) {
        self.combo = Combo::default();
        self.swing = None;
    }

    fn update_guard(&mut self, frame: &InputFrame) {
        self.guarding = frame.held(Action::Guard)
            && self.gate == AttackGate::Ready
            && !frame.was_held(Action::Attack)
            && !self.walking
            && !self.body.motion().is_airborne();
    }

    const fn animate_walk(&mut self, dt: f32) {
        if !self.walking || self.body.motion().is_airborne() {
            self.walk_frame = 1;
            self.walk_elapsed = 0.0;
            return;
        }
        self.walk_elapsed += dt;
        while self.walk_elapsed >= self.tuning.walk_frame_duration {
            self.walk_elapsed -= self.tuning.walk_frame_duration;
            self.walk_frame = self.walk_frame % WALK_FRAMES + 1;
        }
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

    /// The weapon's area, present only while a swing is live.
    ///
    /// The box sits against the side of the body the swing faces,
    /// vertically centred on it.
    #[must_use]
    pub fn weapon_hitbox(&self) -> Option<Aabb> {
        let swing = self.swing?;
        let body = self.bounds();
        let reach = self.tuning.weapon_reach;
        let height = self.tuning.weapon_height;
        let x = match swing.facing {
            Facing::Left => body.left() - reach,
            Facing::Right => body.right(),
        };
        let y = body.top() + (body.h - height) * 0.5;
        Some(Aabb::new(x, y, reach, height))
    }

    /// The swing currently able to deal damage.
    #[must_use]
    pub fn active_strike(&self) -> Option<Strike> {
        if self.is_dead() {
            return None;
        }
        self.weapon_hitbox().map(|hitbox| Strike {
            hitbox,
            stage: self.combo.stage,
            source_x: self.body.position().x,
            damage: self.tuning.strike_damage,
        })
    }

    /// Handles an enemy melee hit from an attacker standing at `source_x`.
    /// The guard absorbs the hit when the player faces the attacker or stands
    /// level with it.
    pub fn receive_melee(&mut self, amount: u32, source_x: f32) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }
        if self.guarding && self.faces(source_x) {
            debug!("player blocked a hit from x={source_x}");
            return HitOutcome::Blocked;
        }
        HitOutcome::Damaged(self.take_damage(amount, source_x))
    }

    const fn faces(&self, source_x: f32) -> bool {
        let x = self.body.position().x;
        match self.facing {
            Facing::Left => source_x <= x,
            Facing::Right => source_x >= x,
        }
    }

    /// Subtracts hit points and starts knockback away from `source_x`.
    pub fn take_damage(&mut self, amount: u32, source_x: f32) -> HealthChange {
        let change = self.health.take(amount);
        match change {
            HealthChange::AlreadyDead => {}
            HealthChange::Killed => {
                self.swing = None;
                self.guarding = false;
                self.body.set_horizontal_velocity(0.0);
                debug!("player died");
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

    /// The player's body.
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

    /// Health record.
    #[must_use]
    pub const fn health(&self) -> &Health {
        &self.health
    }

    /// `true` once hit points reached zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Direction the player faces.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Current combo stage (`0..=3`).
    #[must_use]
    pub const fn combo_stage(&self) -> u8 {
        self.combo.stage
    }

    /// Combo progress.
    #[must_use]
    pub const fn combo(&self) -> Combo {
        self.combo
    }

    /// The live swing, if any.
    #[must_use]
    pub const fn swing(&self) -> Option<Swing> {
        self.swing
    }

    /// `true` while a swing's hitbox is live.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.swing.is_some()
    }

    /// Whether a new swing may start.
    #[must_use]
    pub const fn attack_gate(&self) -> AttackGate {
        self.gate
    }

    /// `true` while the guard is up this frame.
    #[must_use]
    pub const fn is_guarding(&self) -> bool {
        self.guarding
    }

    /// `true` while horizontal movement input is held.
    #[must_use]
    pub const fn is_walking(&self) -> bool {
        self.walking
    }

    /// Walk animation frame, `1..=4`.
    #[must_use]
    pub const fn walk_frame(&self) -> u8 {
        self.walk_frame
    }

    /// Knockback state.
    #[must_use]
    pub const fn knockback(&self) -> &Knockback {
        &self.knockback
    }
}
