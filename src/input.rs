//! Per-frame action state supplied by the host.
//!
//! The simulation never reads a keyboard. The host samples whatever devices
//! it owns and hands the core an [`InputSnapshot`] each frame; entities keep
//! the previous snapshot themselves when they need edge detection.

/// The fixed set of actions the player can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk left.
    MoveLeft,
    /// Walk right.
    MoveRight,
    /// Jump (held to extend the rise).
    Jump,
    /// Swing the weapon.
    Attack,
    /// Raise the guard.
    Guard,
}

/// Held state of every [`Action`] for one frame.
///
/// # Examples
///
/// ```
/// use skirmish::input::{Action, InputSnapshot};
///
/// let input = InputSnapshot::default().with(Action::MoveRight).with(Action::Jump);
/// assert!(input.is_held(Action::MoveRight));
/// assert!(!input.is_held(Action::Attack));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the held state of exactly five action keys."
)]
pub struct InputSnapshot {
    /// Whether move-left is held.
    pub move_left: bool,
    /// Whether move-right is held.
    pub move_right: bool,
    /// Whether jump is held.
    pub jump: bool,
    /// Whether attack is held.
    pub attack: bool,
    /// Whether guard is held.
    pub guard: bool,
}

impl InputSnapshot {
    /// Returns `true` if `action` is held in this snapshot.
    #[must_use]
    pub const fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Jump => self.jump,
            Action::Attack => self.attack,
            Action::Guard => self.guard,
        }
    }

    /// Returns a copy with `action` held.
    #[must_use]
    pub const fn with(mut self, action: Action) -> Self {
        match action {
            Action::MoveLeft => self.move_left = true,
            Action::MoveRight => self.move_right = true,
            Action::Jump => self.jump = true,
            Action::Attack => self.attack = true,
            Action::Guard => self.guard = true,
        }
        self
    }

    /// Horizontal intent: `-1.0` for left, `1.0` for right, `0.0` otherwise.
    ///
    /// Left wins when both directions are held.
    #[must_use]
    pub const fn horizontal(&self) -> f32 {
        if self.move_left {
            -1.0
        } else if self.move_right {
            1.0
        } else {
            0.0
        }
    }
}

/// Current and previous snapshots, for rising-edge detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// This frame's input.
    pub current: InputSnapshot,
    /// Last frame's input.
    pub previous: InputSnapshot,
}

impl InputFrame {
    /// Pairs this frame's input with the previous one.
    #[must_use]
    pub const fn new(current: InputSnapshot, previous: InputSnapshot) -> Self {
        Self { current, previous }
    }

    /// Held this frame.
    #[must_use]
    pub const fn held(&self, action: Action) -> bool {
        self.current.is_held(action)
    }

    /// Held last frame.
    #[must_use]
    pub const fn was_held(&self, action: Action) -> bool {
        self.previous.is_held(action)
    }

    /// Pressed this frame but not the one before.
    #[must_use]
    pub const fn just_pressed(&self, action: Action) -> bool {
        self.held(action) && !self.was_held(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Action::MoveLeft)]
    #[case(Action::MoveRight)]
    #[case(Action::Jump)]
    #[case(Action::Attack)]
    #[case(Action::Guard)]
    fn with_sets_only_that_action(#[case] action: Action) {
        let input = InputSnapshot::default().with(action);
        assert!(input.is_held(action));
        let held = [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Jump,
            Action::Attack,
            Action::Guard,
        ]
        .into_iter()
        .filter(|other| input.is_held(*other))
        .count();
        assert_eq!(held, 1);
    }

    #[rstest]
    fn left_wins_over_right() {
        let input = InputSnapshot::default()
            .with(Action::MoveLeft)
            .with(Action::MoveRight);
        assert_eq!(input.horizontal(), -1.0);
    }

    #[rstest]
    fn rising_edge_only_on_first_frame() {
        let held = InputSnapshot::default().with(Action::Attack);
        assert!(InputFrame::new(held, InputSnapshot::default()).just_pressed(Action::Attack));
        assert!(!InputFrame::new(held, held).just_pressed(Action::Attack));
        assert!(!InputFrame::new(InputSnapshot::default(), held).just_pressed(Action::Attack));
    }
}
