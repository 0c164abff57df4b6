//! Convenience constructors for physics-related records used in tests.

use glam::Vec2;
use skirmish::body::{BodyTuning, KinematicBody, Motion};
use skirmish::config::PlayerTuning;
use skirmish::geometry::{Aabb, Platform};

/// Top edge of [`floor`].
pub const FLOOR_TOP: f32 = 700.0;

/// Create a platform from its top-left corner and size.
///
/// # Examples
/// ```
/// use test_utils::physics::platform;
/// let p = platform(0.0, 700.0, 100.0, 10.0);
/// assert_eq!(p.bounds().bottom(), 710.0);
/// ```
pub fn platform(x: f32, y: f32, w: f32, h: f32) -> Platform {
    Platform::new(Aabb::new(x, y, w, h))
}

/// A wide floor whose top edge sits at [`FLOOR_TOP`].
pub fn floor() -> Vec<Platform> {
    vec![platform(0.0, FLOOR_TOP, 4000.0, 10.0)]
}

/// Body constants matching the default player tuning.
pub fn player_body_tuning() -> BodyTuning {
    PlayerTuning::default().body()
}

/// A 50x50 body resting on [`floor`] at horizontal position `x`.
///
/// # Examples
/// ```
/// use skirmish::body::Motion;
/// use test_utils::physics::{floor, resting_body};
/// let body = resting_body(100.0);
/// assert_eq!(body.motion(), Motion::Grounded);
/// ```
pub fn resting_body(x: f32) -> KinematicBody {
    let mut body = KinematicBody::new(
        Vec2::new(x, FLOOR_TOP - 50.0),
        Vec2::splat(50.0),
        player_body_tuning(),
    );
    step_body(&mut body, &floor(), 0.0);
    debug_assert_eq!(body.motion(), Motion::Grounded);
    body
}

/// Runs one integrate, resolve, gravity cycle.
pub fn step_body(body: &mut KinematicBody, platforms: &[Platform], dt: f32) {
    body.integrate(dt);
    body.resolve(platforms, dt);
    body.apply_gravity(dt);
}
