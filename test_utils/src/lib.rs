//! Utility helpers for tests.
//!
//! Fixture constructors for levels, bodies and arenas, plus a few assertion
//! helpers over combat event streams.

pub mod arena;
pub mod physics;

use skirmish::CombatEvent;

/// Counts events matching `predicate`.
pub fn count_events(events: &[CombatEvent], predicate: impl Fn(&CombatEvent) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

/// Assert that `events` contains exactly `expected` enemy hits.
///
/// # Panics
/// Panics with the full event list if the count differs.
pub fn assert_enemy_hits(events: &[CombatEvent], expected: usize) {
    let hits = count_events(events, |event| matches!(event, CombatEvent::EnemyHit { .. }));
    assert_eq!(hits, expected, "unexpected enemy hits in {events:?}");
}

/// Assert that `events` contains no player damage at all.
///
/// # Panics
/// Panics with the full event list if the player was hit.
pub fn assert_player_untouched(events: &[CombatEvent]) {
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, CombatEvent::PlayerHit { .. } | CombatEvent::PlayerDefeated)),
        "player should not have been hit: {events:?}"
    );
}
