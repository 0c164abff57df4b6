//! Axis-aligned rectangles and the static platforms built from them.
//!
//! All geometry lives in screen space: `x` grows to the right and `y` grows
//! downward, so a rectangle's `top` is numerically smaller than its `bottom`.
//! Overlap tests are strict, mirroring how the renderer's rectangle
//! intersection treats shared edges: two boxes that merely touch do not
//! intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box used for bodies, weapon hitboxes and platforms.
///
/// # Examples
///
/// ```
/// use skirmish::geometry::Aabb;
///
/// let floor = Aabb::new(0.0, 700.0, 1280.0, 10.0);
/// let crate_box = Aabb::new(100.0, 650.0, 50.0, 50.0);
/// // Resting exactly on the floor is contact, not intersection.
/// assert!(!crate_box.intersects(&floor));
/// assert!(crate_box.offset(0.0, 1.0).intersects(&floor));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width; never negative.
    pub w: f32,
    /// Height; never negative.
    pub h: f32,
}

impl Aabb {
    /// Creates a box from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0, "negative extent");
        Self { x, y, w, h }
    }

    /// Creates a box from a top-left position and a size vector.
    #[must_use]
    pub const fn from_position(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Horizontal centre line.
    #[must_use]
    pub const fn centre_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Returns `true` when both boxes share a region of positive area.
    ///
    /// Empty boxes never intersect anything.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.horizontal_overlap(other) && self.vertical_overlap(other)
    }

    /// Returns `true` when the horizontal spans overlap (strictly).
    #[must_use]
    pub const fn horizontal_overlap(&self, other: &Self) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Returns `true` when the vertical spans overlap (strictly).
    #[must_use]
    pub const fn vertical_overlap(&self, other: &Self) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    /// Returns a copy translated by `(dx, dy)`.
    #[must_use]
    pub const fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns `true` if the box has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Returns `true` if every component is finite and both extents are
    /// non-negative.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .all(|value| value.is_finite())
            && self.w >= 0.0
            && self.h >= 0.0
    }
}

/// Immutable level geometry that bodies collide with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(Aabb);

impl Platform {
    /// Wraps a rectangle as a platform.
    #[must_use]
    pub const fn new(bounds: Aabb) -> Self {
        Self(bounds)
    }

    /// The platform's rectangle.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.0
    }
}

impl From<Aabb> for Platform {
    fn from(bounds: Aabb) -> Self {
        Self(bounds)
    }
}
