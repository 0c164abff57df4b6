//! Kinematic bodies: integration, gravity and platform collision.
//!
//! Both combatants own a [`KinematicBody`]. Each frame the owner sets the
//! horizontal velocity it wants, then the arena drives the body through the
//! same cycle:
//!
//! 1. [`KinematicBody::integrate`] moves the body by `velocity * dt` and
//!    remembers where it started.
//! 2. [`KinematicBody::resolve`] tests the moved bounds and the starting
//!    bounds against every platform and applies the first matching
//!    directional rule per platform (land on top, bump a ceiling, blocked on
//!    the left or right side). A body that passed a platform's top or
//!    bottom edge entirely within one frame is still caught: the crossing is
//!    detected from the previous and current edges, not from overlap.
//! 3. [`KinematicBody::apply_gravity`] accelerates a falling body. Gravity
//!    runs after resolution so a velocity zeroed by a landing is not
//!    overwritten in the same frame.
//!
//! Platforms are resolved independently in list order against the bounds
//! computed before the loop. Each correction zeroes or reverses the velocity
//! that gated it, so when two platforms would correct the same axis the
//! first one in the list wins; corrections on different axes all apply.

use glam::Vec2;
use log::trace;
use serde::Serialize;

use crate::geometry::{Aabb, Platform};
use crate::CONTACT_EPSILON;

/// Vertical movement state.
///
/// A body is in exactly one of these; the enum makes "jumping and falling at
/// once" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Motion {
    /// Standing on a platform. Gravity is off and a jump may start.
    Grounded,
    /// Rising from a jump that started at `start_y`.
    Jumping {
        /// Vertical position at take-off.
        start_y: f32,
    },
    /// Airborne and accelerating downward.
    Falling,
}

impl Motion {
    /// `true` for [`Motion::Jumping`] and [`Motion::Falling`].
    #[must_use]
    pub const fn is_airborne(&self) -> bool {
        !matches!(self, Self::Grounded)
    }
}

/// Per-entity constants the body needs during resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTuning {
    /// Downward acceleration while falling.
    pub gravity: f32,
    /// Take-off speed, also folded into the ceiling-bump push.
    pub jump_speed: f32,
    /// Extra push added to the ceiling-bump velocity.
    pub bump_impulse: f32,
}

/// What happened during one [`KinematicBody::resolve`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag records an independent collision rule that fired."
)]
pub struct Contact {
    /// At least one platform overlapped the current or previous bounds.
    pub touched: bool,
    /// The body landed on a platform top this frame.
    pub landed: bool,
    /// The body hit a platform's underside while rising.
    pub bumped: bool,
    /// Horizontal movement was stopped by a platform side.
    pub blocked: bool,
}

/// Position, velocity and motion state of one axis-aligned body.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use skirmish::body::{BodyTuning, KinematicBody, Motion};
/// use skirmish::geometry::{Aabb, Platform};
///
/// let tuning = BodyTuning { gravity: 5000.0, jump_speed: 500.0, bump_impulse: 400_000.0 };
/// let floor = [Platform::new(Aabb::new(0.0, 700.0, 1280.0, 10.0))];
/// let mut body = KinematicBody::new(Vec2::new(100.0, 640.0), Vec2::new(50.0, 50.0), tuning);
/// for _ in 0..30 {
///     body.integrate(0.016);
///     body.resolve(&floor, 0.016);
///     body.apply_gravity(0.016);
/// }
/// assert_eq!(body.motion(), Motion::Grounded);
/// assert!((body.bounds().bottom() - 700.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    position: Vec2,
    previous: Vec2,
    velocity: Vec2,
    size: Vec2,
    motion: Motion,
    tuning: BodyTuning,
}

impl KinematicBody {
    /// Creates a body at `position` (top-left corner). New bodies start
    /// falling so they settle onto whatever is beneath them.
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2, tuning: BodyTuning) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "negative body size");
        Self {
            position,
            previous: position,
            velocity: Vec2::ZERO,
            size,
            motion: Motion::Falling,
            tuning,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity in pixels per second.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Body extent.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Vertical movement state.
    #[must_use]
    pub const fn motion(&self) -> Motion {
        self.motion
    }

    /// Constants used during resolution.
    #[must_use]
    pub const fn tuning(&self) -> &BodyTuning {
        &self.tuning
    }

    /// Bounds at the current position.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        Aabb::from_position(self.position, self.size)
    }

    /// Bounds where the body stood before the last integration.
    #[must_use]
    pub const fn previous_bounds(&self) -> Aabb {
        Aabb::from_position(self.previous, self.size)
    }

    /// Sets the horizontal velocity for the next integration.
    pub const fn set_horizontal_velocity(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    /// Starts a jump if the body is on the ground. Returns `true` if it did.
    pub fn begin_jump(&mut self) -> bool {
        if self.motion != Motion::Grounded {
            return false;
        }
        self.motion = Motion::Jumping {
            start_y: self.position.y,
        };
        self.velocity.y = -self.tuning.jump_speed;
        true
    }

    /// Extends or ends a jump in progress.
    ///
    /// While `held` and the body is still below `max_height` above its
    /// take-off point the upward velocity keeps growing; otherwise the jump
    /// ends and the body starts to fall.
    pub const fn sustain_jump(&mut self, held: bool, max_height: f32, dt: f32) {
        let Motion::Jumping { start_y } = self.motion else {
            return;
        };
        if held && self.position.y > start_y - max_height {
            self.velocity.y -= self.tuning.gravity * dt;
        } else {
            self.motion = Motion::Falling;
        }
    }

    /// Moves the body by `velocity * dt`.
    pub fn integrate(&mut self, dt: f32) {
        self.previous = self.position;
        self.position += self.velocity * dt;
        debug_assert!(self.position.is_finite(), "body position diverged");
    }

    /// Resolves overlaps with `platforms` after an integration step.
    pub fn resolve(&mut self, platforms: &[Platform], dt: f32) -> Contact {
        let current = self.bounds();
        let previous = self.previous_bounds();
        let mut contact = Contact::default();

        for platform in platforms {
            let rect = platform.bounds();
            let crossed_top = self.velocity.y > 0.0
                && previous.bottom() <= rect.top()
                && current.bottom() > rect.top()
                && current.horizontal_overlap(rect);
            let crossed_bottom = self.velocity.y < 0.0
                && previous.top() >= rect.bottom()
                && current.top() < rect.bottom()
                && current.horizontal_overlap(rect);
            if !current.intersects(rect)
                && !previous.intersects(rect)
                && !crossed_top
                && !crossed_bottom
            {
                continue;
            }
            contact.touched = true;

            if crossed_top {
                self.position.y = rect.top() - current.h;
                self.velocity.y = 0.0;
                self.motion = Motion::Grounded;
                contact.landed = true;
            } else if crossed_bottom
                || (self.velocity.y < 0.0
                    && current.top() < rect.bottom()
                    && current.bottom() > rect.bottom())
            {
                self.position.y = rect.bottom();
                self.velocity.y =
                    (self.tuning.gravity + self.tuning.jump_speed + self.tuning.bump_impulse) * dt;
                self.motion = Motion::Falling;
                contact.bumped = true;
            } else if self.velocity.x > 0.0
                && current.right() > rect.left()
                && current.left() < rect.left()
                && current.vertical_overlap(rect)
            {
                self.position.x = rect.left() - current.w;
                self.velocity.x = 0.0;
                contact.blocked = true;
            } else if self.velocity.x < 0.0
                && current.left() < rect.right()
                && current.right() > rect.right()
                && current.vertical_overlap(rect)
            {
                self.position.x = rect.right();
                self.velocity.x = 0.0;
                contact.blocked = true;
            }
        }

        let supported = contact.landed || self.is_supported(platforms);
        if supported {
            if self.motion == Motion::Falling && self.velocity.y >= 0.0 {
                self.motion = Motion::Grounded;
                self.velocity.y = 0.0;
            }
        } else if !matches!(self.motion, Motion::Jumping { .. }) {
            self.motion = Motion::Falling;
        }

        if contact != Contact::default() {
            trace!("body at {:?} resolved {contact:?}", self.position);
        }
        contact
    }

    /// Accelerates the body downward while it is falling.
    pub fn apply_gravity(&mut self, dt: f32) {
        if self.motion == Motion::Falling {
            self.velocity.y += self.tuning.gravity * dt;
        }
    }

    /// `true` if the bottom edge rests on some platform's top edge.
    #[must_use]
    pub fn is_supported(&self, platforms: &[Platform]) -> bool {
        let bounds = self.bounds();
        platforms.iter().any(|platform| {
            let rect = platform.bounds();
            (bounds.bottom() - rect.top()).abs() <= CONTACT_EPSILON
                && bounds.horizontal_overlap(rect)
        })
    }
}
