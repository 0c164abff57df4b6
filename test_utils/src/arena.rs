//! Arena fixtures and frame drivers.

use glam::Vec2;
use skirmish::config::{EnemyTuning, PlayerTuning};
use skirmish::input::{Action, InputSnapshot};
use skirmish::{Arena, CombatEvent, Enemy, Player};

use crate::physics::{floor, FLOOR_TOP};

/// Frame delta used by the drivers below.
pub const DT: f32 = 0.02;

/// Top edge of a 50-pixel-tall combatant standing on the floor.
pub const STANDING_Y: f32 = FLOOR_TOP - 50.0;

/// A player standing on the floor at `player_x` facing one enemy at
/// `enemy_x`.
pub fn duel(player_x: f32, enemy_x: f32) -> Arena {
    duel_with(player_x, enemy_x, PlayerTuning::default(), EnemyTuning::default())
}

/// Like [`duel`] with explicit tuning.
pub fn duel_with(
    player_x: f32,
    enemy_x: f32,
    player: PlayerTuning,
    enemy: EnemyTuning,
) -> Arena {
    Arena::new(
        floor(),
        Player::new(Vec2::new(player_x, STANDING_Y), player),
        vec![Enemy::new(Vec2::new(enemy_x, STANDING_Y), enemy)],
    )
}

/// A player alone on the floor.
pub fn solo(player_x: f32) -> Arena {
    Arena::new(
        floor(),
        Player::new(Vec2::new(player_x, STANDING_Y), PlayerTuning::default()),
        Vec::new(),
    )
}

/// An input snapshot with every action in `actions` held.
///
/// # Examples
/// ```
/// use skirmish::input::Action;
/// use test_utils::arena::held;
/// let input = held(&[Action::Jump, Action::MoveLeft]);
/// assert!(input.jump && input.move_left);
/// ```
pub fn held(actions: &[Action]) -> InputSnapshot {
    actions
        .iter()
        .fold(InputSnapshot::default(), |input, action| input.with(*action))
}

/// Steps `arena` `frames` times with the same input, collecting every event.
pub fn run_frames(arena: &mut Arena, frames: usize, input: InputSnapshot) -> Vec<CombatEvent> {
    (0..frames)
        .flat_map(|_| arena.step(DT, &input).events)
        .collect()
}

/// Holds `action` for one frame, then releases everything for one frame.
pub fn tap(arena: &mut Arena, action: Action) -> Vec<CombatEvent> {
    let mut events = arena.step(DT, &held(&[action])).events;
    events.extend(arena.step(DT, &InputSnapshot::default()).events);
    events
}
