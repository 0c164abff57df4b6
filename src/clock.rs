//! Frame delta clamping and pause handling.
//!
//! The host measures wall-clock time between frames; [`FrameClock`] turns
//! that into the delta the simulation integrates, or into nothing at all when
//! the game is paused or the window lost focus. A paused frame freezes every
//! timer because the core simply is not stepped.

use log::debug;

use crate::MAX_FRAME_DELTA;

/// Turns raw frame deltas into simulation deltas.
///
/// # Examples
///
/// ```
/// use skirmish::clock::FrameClock;
///
/// let mut clock = FrameClock::new(0.1);
/// assert_eq!(clock.advance(0.016), Some(0.016));
/// // A window drag stalls the loop for two seconds; only 0.1s is integrated.
/// assert_eq!(clock.advance(2.0), Some(0.1));
/// clock.toggle_pause();
/// assert_eq!(clock.advance(0.016), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    max_delta: f32,
    paused: bool,
    focused: bool,
}

impl FrameClock {
    /// Creates a running clock that clamps deltas to `max_delta`.
    #[must_use]
    pub const fn new(max_delta: f32) -> Self {
        debug_assert!(max_delta > 0.0, "max_delta must be positive");
        Self {
            max_delta,
            paused: false,
            focused: true,
        }
    }

    /// Largest delta this clock hands out.
    #[must_use]
    pub const fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Returns the delta to integrate this frame, or `None` if the
    /// simulation must not advance.
    ///
    /// Negative and non-finite inputs are treated as zero.
    #[must_use]
    pub const fn advance(&self, raw_delta: f32) -> Option<f32> {
        if !self.is_running() {
            return None;
        }
        if !raw_delta.is_finite() || raw_delta <= 0.0 {
            return Some(0.0);
        }
        if raw_delta > self.max_delta {
            Some(self.max_delta)
        } else {
            Some(raw_delta)
        }
    }

    /// Flips the explicit pause toggle.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!("simulation {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Records whether the host window has input focus.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            debug!("window focus changed: focused={focused}");
        }
        self.focused = focused;
    }

    /// Whether the explicit pause toggle is on.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// `true` when neither paused nor unfocused.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        !self.paused && self.focused
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.05, Some(0.05))]
    #[case(0.5, Some(0.1))]
    #[case(-1.0, Some(0.0))]
    #[case(f32::NAN, Some(0.0))]
    fn running_clock_clamps(#[case] raw: f32, #[case] expected: Option<f32>) {
        assert_eq!(FrameClock::default().advance(raw), expected);
    }

    #[rstest]
    fn focus_loss_stops_the_clock() {
        let mut clock = FrameClock::default();
        clock.set_focused(false);
        assert_eq!(clock.advance(0.016), None);
        clock.set_focused(true);
        assert_eq!(clock.advance(0.016), Some(0.016));
    }

    #[rstest]
    fn pause_toggles_back() {
        let mut clock = FrameClock::default();
        clock.toggle_pause();
        assert!(clock.is_paused());
        assert!(!clock.is_running());
        clock.toggle_pause();
        assert!(clock.is_running());
    }
}
