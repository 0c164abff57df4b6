//! Behavioural tests for damage arbitration between the player and an enemy.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use rspec_runner::run_serial;
use skirmish::config::{EnemyTuning, PlayerTuning};
use skirmish::input::{Action, InputSnapshot};
use skirmish::{Arena, CombatEvent, Outcome};
use test_utils::arena::{duel, duel_with, held, run_frames, tap};
use test_utils::{assert_enemy_hits, assert_player_untouched, count_events};

/// An arena plus every event it produced while the scenario ran.
#[derive(Debug, Clone)]
struct Bout {
    arena: Arena,
    events: Vec<CombatEvent>,
}

impl Bout {
    const fn new(arena: Arena) -> Self {
        Self {
            arena,
            events: Vec::new(),
        }
    }

    /// The enemy does not get pushed out of reach between swings.
    fn rooted_enemy() -> Self {
        let enemy = EnemyTuning {
            knockback_velocity: 0.0,
            ..EnemyTuning::default()
        };
        Self::new(duel_with(1720.0, 1800.0, PlayerTuning::default(), enemy))
    }

    fn tap(&mut self, action: Action) {
        let events = tap(&mut self.arena, action);
        self.events.extend(events);
    }

    fn hold(&mut self, frames: usize, input: InputSnapshot) {
        let events = run_frames(&mut self.arena, frames, input);
        self.events.extend(events);
    }

    fn enemy_hp(&self) -> Option<u32> {
        self.arena.enemies().first().map(skirmish::Enemy::hp)
    }
}

#[test]
fn one_swing_lands_once() {
    run_serial(&rspec::given(
        "a player standing within reach of an enemy",
        Bout::new(duel(1720.0, 1800.0)),
        |suite| {
            suite.when("the player swings once and waits", |scenario| {
                scenario.before_each(|bout| {
                    *bout = Bout::new(duel(1720.0, 1800.0));
                    bout.tap(Action::Attack);
                    bout.hold(15, InputSnapshot::default());
                });

                scenario.then("exactly one hit is registered", |bout| {
                    assert_enemy_hits(&bout.events, 1);
                });

                scenario.then("the enemy loses one hit point", |bout| {
                    assert_eq!(bout.enemy_hp(), Some(4));
                });

                scenario.then("the enemy is pushed away", |bout| {
                    let x = bout.arena.enemies().first().map(|e| e.position().x);
                    assert!(x.is_some_and(|pushed| pushed > 1800.0), "enemy at {x:?}");
                });
            });
        },
    ));
}

#[test]
fn combos_land_three_times_then_reset() {
    run_serial(&rspec::given(
        "a player beside an enemy that does not flinch",
        Bout::rooted_enemy(),
        |suite| {
            suite.when("the player presses attack three times", |scenario| {
                scenario.before_each(|bout| {
                    *bout = Bout::rooted_enemy();
                    for _ in 0..3 {
                        bout.tap(Action::Attack);
                    }
                });

                scenario.then("each stage lands once", |bout| {
                    let stages: Vec<u8> = bout
                        .events
                        .iter()
                        .filter_map(|event| match event {
                            CombatEvent::EnemyHit { stage, .. } => Some(*stage),
                            _ => None,
                        })
                        .collect();
                    assert_eq!(stages, vec![1, 2, 3]);
                    assert_eq!(bout.enemy_hp(), Some(2));
                });
            });

            suite.when("the player presses attack a fourth time", |scenario| {
                scenario.before_each(|bout| {
                    *bout = Bout::rooted_enemy();
                    for _ in 0..4 {
                        bout.tap(Action::Attack);
                    }
                });

                scenario.then("the combo resets without a fourth hit", |bout| {
                    assert_enemy_hits(&bout.events, 3);
                    assert_eq!(bout.arena.player().combo_stage(), 0);
                    assert!(!bout.arena.player().is_attacking());
                });
            });
        },
    ));
}

#[test]
fn guard_blocks_only_when_facing() {
    run_serial(&rspec::given(
        "a player overlapping an aggressive enemy",
        Bout::new(duel(1790.0, 1800.0)),
        |suite| {
            suite.when("the player guards facing the enemy", |scenario| {
                scenario.before_each(|bout| {
                    *bout = Bout::new(duel(1790.0, 1800.0));
                    bout.hold(60, held(&[Action::Guard]));
                });

                scenario.then("the contact hit is blocked", |bout| {
                    let blocked = count_events(&bout.events, |event| {
                        matches!(event, CombatEvent::PlayerBlocked { .. })
                    });
                    assert_eq!(blocked, 1);
                    assert_player_untouched(&bout.events);
                    assert_eq!(bout.arena.player().hp(), 10);
                });
            });

            suite.when("the player guards facing away", |scenario| {
                scenario.before_each(|bout| {
                    *bout = Bout::new(duel(1790.0, 1800.0));
                    bout.hold(1, held(&[Action::MoveLeft]));
                    bout.hold(60, held(&[Action::Guard]));
                });

                scenario.then("the contact hit lands", |bout| {
                    assert!(bout
                        .events
                        .contains(&CombatEvent::PlayerHit { enemy: 0, remaining: 9 }));
                    assert_eq!(bout.arena.player().hp(), 9);
                });
            });
        },
    ));
}

#[test]
fn sessions_end() {
    run_serial(&rspec::given(
        "a fragile enemy",
        Bout::new(duel(1720.0, 1800.0)),
        |suite| {
            suite.when("the player lands a single swing", |scenario| {
                scenario.before_each(|bout| {
                    let enemy = EnemyTuning {
                        max_hp: 1,
                        ..EnemyTuning::default()
                    };
                    *bout = Bout::new(duel_with(1720.0, 1800.0, PlayerTuning::default(), enemy));
                    bout.tap(Action::Attack);
                });

                scenario.then("the enemy is defeated and the player wins", |bout| {
                    assert!(bout.events.contains(&CombatEvent::EnemyDefeated { enemy: 0 }));
                    assert_eq!(bout.arena.outcome(), Outcome::Victory);
                    assert!(bout.arena.snapshot().enemies.is_empty());
                });
            });

            suite.when("a fragile player stands in the enemy", |scenario| {
                scenario.before_each(|bout| {
                    let player = PlayerTuning {
                        max_hp: 1,
                        ..PlayerTuning::default()
                    };
                    *bout = Bout::new(duel_with(1790.0, 1800.0, player, EnemyTuning::default()));
                    bout.hold(120, InputSnapshot::default());
                });

                scenario.then("the player is defeated once and the arena freezes", |bout| {
                    let defeats = count_events(&bout.events, |event| {
                        *event == CombatEvent::PlayerDefeated
                    });
                    assert_eq!(defeats, 1);
                    assert_eq!(bout.arena.outcome(), Outcome::Defeat);
                    assert!(bout.arena.frame() < 120);
                });
            });
        },
    ));
}
