//! Numeric conversion helpers used across the project.
//!
//! The simulation works in `f32` but the renderer wants whole pixels. These
//! helpers keep the float-to-integer conversions in one place and clamp into
//! the target domain instead of relying on saturating `as` casts silently.

/// Truncate toward zero and clamp into the `i32` domain.
///
/// Non-finite values map to `0`.
///
/// # Examples
///
/// ```
/// use skirmish::numeric::truncate_to_i32;
/// assert_eq!(truncate_to_i32(12.9), 12);
/// assert_eq!(truncate_to_i32(-12.9), -12);
/// assert_eq!(truncate_to_i32(f32::NAN), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn truncate_to_i32(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let truncated = f64::from(value.trunc());
    truncated.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

/// Convert a non-negative extent into whole pixels, clamping into `u32`.
///
/// # Examples
///
/// ```
/// use skirmish::numeric::extent_to_u32;
/// assert_eq!(extent_to_u32(50.7), 50);
/// assert_eq!(extent_to_u32(-3.0), 0);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The value is clamped to the u32 bounds before casting."
)]
#[must_use]
pub fn extent_to_u32(value: f32) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let truncated = f64::from(value.trunc());
    truncated.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(99.99, 99)]
    #[case(-0.5, 0)]
    #[case(1.0e12, i32::MAX)]
    #[case(-1.0e12, i32::MIN)]
    #[case(f32::INFINITY, 0)]
    fn truncation_clamps(#[case] input: f32, #[case] expected: i32) {
        assert_eq!(truncate_to_i32(input), expected);
    }

    #[rstest]
    fn extents_never_go_negative() {
        assert_eq!(extent_to_u32(-10.0), 0);
        assert_eq!(extent_to_u32(10.5), 10);
    }
}
