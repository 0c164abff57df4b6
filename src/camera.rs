//! Horizontal follow camera.
//!
//! The camera tracks the player's centre along `x` and never scrolls
//! vertically. World boxes are moved into view space by subtracting the
//! camera position truncated to whole pixels, so everything drawn in one frame
//! shifts by the same integer amount.

use serde::Serialize;

use crate::geometry::Aabb;
use crate::numeric::{extent_to_u32, truncate_to_i32};
use crate::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// A rectangle in whole screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

/// Camera position and viewport size.
///
/// # Examples
///
/// ```
/// use skirmish::camera::Camera;
/// use skirmish::geometry::Aabb;
///
/// let mut camera = Camera::new(1280.0, 720.0);
/// camera.follow(&Aabb::new(2000.0, 650.0, 50.0, 50.0));
/// let on_screen = camera.apply(Aabb::new(2000.0, 650.0, 50.0, 50.0));
/// assert_eq!(on_screen.x, 615.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    x: f32,
    y: f32,
    viewport_w: f32,
    viewport_h: f32,
}

impl Camera {
    /// A camera at the origin showing a `viewport_w` x `viewport_h` view.
    #[must_use]
    pub const fn new(viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            viewport_w,
            viewport_h,
        }
    }

    /// Centres the view horizontally on `target`.
    pub const fn follow(&mut self, target: &Aabb) {
        self.x = target.centre_x() - self.viewport_w / 2.0;
        self.y = 0.0;
    }

    /// Moves a world box into view space.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Camera offsets are level-sized and fit exactly in f32."
    )]
    #[must_use]
    pub fn apply(&self, world: Aabb) -> Aabb {
        let dx = truncate_to_i32(self.x);
        let dy = truncate_to_i32(self.y);
        world.offset(-(dx as f32), -(dy as f32))
    }

    /// Moves a world box into view space and snaps it to pixels.
    #[must_use]
    pub fn to_pixels(&self, world: Aabb) -> PixelRect {
        let view = self.apply(world);
        PixelRect {
            x: truncate_to_i32(view.x),
            y: truncate_to_i32(view.y),
            w: extent_to_u32(view.w),
            h: extent_to_u32(view.h),
        }
    }

    /// Horizontal camera position.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical camera position; always `0`.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Viewport width.
    #[must_use]
    pub const fn viewport_width(&self) -> f32 {
        self.viewport_w
    }

    /// Viewport height.
    #[must_use]
    pub const fn viewport_height(&self) -> f32 {
        self.viewport_h
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn follow_centres_on_target() {
        let mut camera = Camera::default();
        camera.follow(&Aabb::new(375.0, 650.0, 50.0, 50.0));
        assert_eq!(camera.x(), -240.0);
        assert_eq!(camera.y(), 0.0);
        let floor = camera.apply(Aabb::new(0.0, 700.0, 1280.0, 10.0));
        assert_eq!(floor, Aabb::new(240.0, 700.0, 1280.0, 10.0));
    }

    #[rstest]
    #[case(100.7, 100)]
    #[case(-100.7, -100)]
    fn offset_is_truncated(#[case] target_x: f32, #[case] camera_x: i32) {
        let mut camera = Camera::new(0.0, 720.0);
        camera.follow(&Aabb::new(target_x, 0.0, 0.0, 0.0));
        let pixels = camera.to_pixels(Aabb::new(500.0, 20.0, 10.0, 10.0));
        assert_eq!(pixels.x, 500 - camera_x);
        assert_eq!(pixels.y, 20);
        assert_eq!((pixels.w, pixels.h), (10, 10));
    }
}
