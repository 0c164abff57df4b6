//! Behavioural tests for the enemy state machine.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use glam::Vec2;
use rspec_runner::run_serial;
use skirmish::combat::Facing;
use skirmish::config::EnemyTuning;
use skirmish::enemy::{Behaviour, Opponent};
use skirmish::geometry::Aabb;
use skirmish::input::InputSnapshot;
use skirmish::{Arena, Enemy};
use test_utils::arena::{duel, run_frames, STANDING_Y};

const fn opponent_at(x: f32) -> Opponent {
    Opponent::new(Aabb::new(x, STANDING_Y, 50.0, 50.0))
}

fn sentry() -> Enemy {
    Enemy::new(Vec2::new(1800.0, STANDING_Y), EnemyTuning::default())
}

const fn patrol_heading(enemy: &Enemy) -> Option<Facing> {
    match enemy.behaviour() {
        Behaviour::Patrol { heading, .. } => Some(heading),
        Behaviour::Aggro { .. } => None,
    }
}

#[derive(Debug, Clone)]
struct Watch {
    enemy: Enemy,
    headings: Vec<Option<Facing>>,
}

impl Watch {
    fn new() -> Self {
        Self {
            enemy: sentry(),
            headings: Vec::new(),
        }
    }
}

#[test]
fn aggro_latches() {
    run_serial(&rspec::given(
        "an enemy at x=1800 and a player at x=1750",
        Watch::new(),
        |suite| {
            suite.when("one frame passes and the player then runs far away", |scenario| {
                scenario.before_each(|watch| {
                    *watch = Watch::new();
                    watch.enemy.think(0.016, &opponent_at(1750.0));
                    watch.headings.push(patrol_heading(&watch.enemy));
                    for _ in 0..200 {
                        watch.enemy.think(0.016, &opponent_at(3000.0));
                    }
                });

                scenario.then("the enemy turned aggressive on the first frame", |watch| {
                    assert_eq!(watch.headings.first(), Some(&None));
                });

                scenario.then("the enemy is still aggressive", |watch| {
                    assert!(watch.enemy.is_aggro());
                });

                scenario.then("the enemy holds its position", |watch| {
                    assert_eq!(watch.enemy.velocity().x, 0.0);
                    assert!(!watch.enemy.is_stabbing());
                });
            });
        },
    ));
}

#[test]
fn patrol_turns_on_summed_time() {
    run_serial(&rspec::given(
        "a patrolling enemy with nobody in sight",
        Watch::new(),
        |suite| {
            suite.when("uneven frames add up to the patrol duration", |scenario| {
                scenario.before_each(|watch| {
                    *watch = Watch::new();
                    for dt in [0.25, 0.75, 0.5, 0.125, 0.875, 0.5] {
                        watch.enemy.think(dt, &opponent_at(0.0));
                        watch.headings.push(patrol_heading(&watch.enemy));
                    }
                });

                scenario.then("it walks left until the last frame", |watch| {
                    let mut before_last = watch.headings.iter().rev().skip(1);
                    assert!(before_last.all(|h| *h == Some(Facing::Left)));
                });

                scenario.then("it turns right exactly at the duration", |watch| {
                    assert_eq!(watch.headings.last(), Some(&Some(Facing::Right)));
                });
            });
        },
    ));
}

#[derive(Debug, Clone)]
struct Standoff {
    arena: Arena,
}

#[test]
fn stabs_close_the_distance() {
    run_serial(&rspec::given(
        "an enemy that has spotted a player 100 pixels away",
        Standoff {
            arena: duel(1700.0, 1800.0),
        },
        |suite| {
            suite.when("the stab cooldown elapses", |scenario| {
                scenario.before_each(|standoff| {
                    standoff.arena = duel(1700.0, 1800.0);
                    run_frames(&mut standoff.arena, 115, InputSnapshot::default());
                });

                scenario.then("the enemy has dashed toward the player", |standoff| {
                    let x = standoff.arena.enemies().first().map(|e| e.position().x);
                    assert!(x.is_some_and(|closed| closed < 1760.0), "enemy at {x:?}");
                });

                scenario.then("the enemy faces the player", |standoff| {
                    let facing = standoff.arena.enemies().first().map(Enemy::facing);
                    assert_eq!(facing, Some(Facing::Left));
                });
            });
        },
    ));
}
