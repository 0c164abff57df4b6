//! Combat state shared by every combatant.
//!
//! Health, facing, knockback and the per-defender hit marker that makes one
//! swing land exactly once no matter how many frames its hitbox overlaps the
//! target.

use serde::Serialize;

use crate::geometry::Aabb;

/// Which way a combatant looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Facing {
    /// Looking toward negative `x`.
    Left,
    /// Looking toward positive `x`.
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Hit points with a terminal zero state.
///
/// # Examples
///
/// ```
/// use skirmish::combat::Health;
///
/// let mut health = Health::new(2);
/// health.take(5);
/// assert_eq!(health.current(), 0);
/// assert!(health.is_dead());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

/// Result of applying damage to [`Health`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    /// Damage was applied and the owner survived.
    Wounded {
        /// Hit points left.
        remaining: u32,
    },
    /// This hit brought hit points to zero.
    Killed,
    /// The owner was already dead; nothing changed.
    AlreadyDead,
}

impl Health {
    /// Full health of `max` points.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Hit points left.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Starting hit points.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// `true` once hit points reached zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Subtracts `amount`, flooring at zero.
    pub const fn take(&mut self, amount: u32) -> HealthChange {
        if self.is_dead() {
            return HealthChange::AlreadyDead;
        }
        self.current = self.current.saturating_sub(amount);
        if self.is_dead() {
            HealthChange::Killed
        } else {
            HealthChange::Wounded {
                remaining: self.current,
            }
        }
    }
}

/// A timed push away from whoever dealt the last hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Knockback {
    direction: i8,
    remaining: f32,
}

impl Knockback {
    /// Starts a knockback. The push points away from `source_x`: `+1` when
    /// the source is left of `body_x`, `-1` otherwise.
    pub const fn start(&mut self, source_x: f32, body_x: f32, duration: f32) {
        self.direction = if source_x < body_x { 1 } else { -1 };
        self.remaining = duration;
    }

    /// Counts the timer down by `dt`.
    pub const fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            let left = self.remaining - dt;
            if left > 0.0 {
                self.remaining = left;
            } else {
                self.remaining = 0.0;
                self.direction = 0;
            }
        }
    }

    /// `true` while the push is in effect.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Push direction: `-1`, `0` or `1`.
    #[must_use]
    pub const fn direction(&self) -> i8 {
        self.direction
    }

    /// Horizontal velocity that overrides movement while active.
    #[must_use]
    pub fn velocity(&self, speed: f32) -> Option<f32> {
        self.is_active().then(|| f32::from(self.direction) * speed)
    }
}

/// An attacker's live swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    /// Area the swing covers this frame.
    pub hitbox: Aabb,
    /// Combo stage of the swing; doubles as its identity.
    pub stage: u8,
    /// Attacker's horizontal position, used for knockback direction.
    pub source_x: f32,
    /// Damage the swing deals on connect.
    pub damage: u32,
}

/// Remembers which stage of the attacker's combo already hit this defender.
///
/// # Examples
///
/// ```
/// use skirmish::combat::{HitMarker, Strike};
/// use skirmish::geometry::Aabb;
///
/// let defender = Aabb::new(0.0, 0.0, 50.0, 50.0);
/// let swing = Strike { hitbox: Aabb::new(40.0, 10.0, 40.0, 20.0), stage: 1, source_x: 80.0, damage: 1 };
/// let mut marker = HitMarker::default();
/// assert!(marker.register(&swing, &defender));
/// // The same swing overlapping on the next frame does not land again.
/// assert!(!marker.register(&swing, &defender));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitMarker {
    last_stage: Option<u8>,
}

impl HitMarker {
    /// Returns `true` if `strike` connects with `defender` and its stage is
    /// newer than the last one that landed. Records the stage when it does.
    pub fn register(&mut self, strike: &Strike, defender: &Aabb) -> bool {
        if !strike.hitbox.intersects(defender) {
            return false;
        }
        if self.last_stage.is_some_and(|last| strike.stage <= last) {
            return false;
        }
        self.last_stage = Some(strike.stage);
        true
    }

    /// Forgets the last stage so the attacker's next swing can land.
    pub const fn rearm(&mut self) {
        self.last_stage = None;
    }

    /// Stage of the swing that last landed, if any since the last rearm.
    #[must_use]
    pub const fn last_stage(&self) -> Option<u8> {
        self.last_stage
    }
}

/// How an incoming hit was handled by the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Damage was applied.
    Damaged(HealthChange),
    /// The defender's guard absorbed the hit.
    Blocked,
    /// The defender was already dead.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, 1, HealthChange::Wounded { remaining: 4 })]
    #[case(1, 1, HealthChange::Killed)]
    #[case(3, 10, HealthChange::Killed)]
    fn damage_floors_at_zero(#[case] max: u32, #[case] amount: u32, #[case] expected: HealthChange) {
        let mut health = Health::new(max);
        assert_eq!(health.take(amount), expected);
    }

    #[rstest]
    fn dead_is_terminal() {
        let mut health = Health::new(1);
        health.take(1);
        assert_eq!(health.take(1), HealthChange::AlreadyDead);
        assert_eq!(health.current(), 0);
    }

    #[rstest]
    #[case::source_on_left(0.0, 100.0, 1)]
    #[case::source_on_right(200.0, 100.0, -1)]
    #[case::source_level(100.0, 100.0, -1)]
    fn knockback_points_away(#[case] source: f32, #[case] body: f32, #[case] expected: i8) {
        let mut knockback = Knockback::default();
        knockback.start(source, body, 0.1);
        assert_eq!(knockback.direction(), expected);
        assert_eq!(knockback.velocity(400.0), Some(f32::from(expected) * 400.0));
    }

    #[rstest]
    fn knockback_expires() {
        let mut knockback = Knockback::default();
        knockback.start(0.0, 100.0, 0.1);
        knockback.tick(0.06);
        assert!(knockback.is_active());
        knockback.tick(0.06);
        assert!(!knockback.is_active());
        assert_eq!(knockback.velocity(400.0), None);
        assert_eq!(knockback.direction(), 0);
    }

    #[rstest]
    fn marker_accepts_later_stages_and_rearms() {
        let defender = Aabb::new(0.0, 0.0, 50.0, 50.0);
        let first = Strike {
            hitbox: Aabb::new(40.0, 10.0, 40.0, 20.0),
            stage: 1,
            source_x: 80.0,
            damage: 1,
        };
        let second = Strike { stage: 2, ..first };
        let mut marker = HitMarker::default();
        assert!(marker.register(&first, &defender));
        assert!(marker.register(&second, &defender));
        assert!(!marker.register(&first, &defender));
        marker.rearm();
        assert!(marker.register(&first, &defender));
    }

    #[rstest]
    fn marker_ignores_misses() {
        let defender = Aabb::new(0.0, 0.0, 50.0, 50.0);
        let miss = Strike {
            hitbox: Aabb::new(200.0, 10.0, 40.0, 20.0),
            stage: 1,
            source_x: 240.0,
            damage: 1,
        };
        let mut marker = HitMarker::default();
        assert!(!marker.register(&miss, &defender));
        assert_eq!(marker.last_stage(), None);
    }
}
