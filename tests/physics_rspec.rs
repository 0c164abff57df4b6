//! Behavioural tests for kinematic bodies using rust-rspec.
//!
//! Every scenario rebuilds its body in `before_each`, so examples never see
//! state left behind by a sibling.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use approx::assert_relative_eq;
use glam::Vec2;
use rspec_runner::run_serial;
use skirmish::body::{KinematicBody, Motion};
use skirmish::geometry::Platform;
use test_utils::physics::{floor, platform, player_body_tuning, resting_body, step_body, FLOOR_TOP};

const DT: f32 = 0.016;

#[derive(Debug, Clone)]
struct BodyWorld {
    body: KinematicBody,
    platforms: Vec<Platform>,
}

impl BodyWorld {
    fn resting() -> Self {
        Self {
            body: resting_body(100.0),
            platforms: floor(),
        }
    }

    fn dropped_from(y: f32) -> Self {
        Self {
            body: KinematicBody::new(Vec2::new(100.0, y), Vec2::splat(50.0), player_body_tuning()),
            platforms: floor(),
        }
    }

    fn beside_wall() -> Self {
        let mut platforms = floor();
        platforms.push(platform(200.0, 500.0, 50.0, 200.0));
        Self {
            body: resting_body(140.0),
            platforms,
        }
    }

    fn run(&mut self, frames: usize, vx: f32) {
        for _ in 0..frames {
            self.body.set_horizontal_velocity(vx);
            step_body(&mut self.body, &self.platforms, DT);
        }
    }
}

#[test]
fn resting_bodies_stay_put() {
    run_serial(&rspec::given(
        "a body resting exactly on the floor",
        BodyWorld::resting(),
        |suite| {
            suite.when("several frames pass without input", |scenario| {
                scenario.before_each(|world| {
                    *world = BodyWorld::resting();
                    world.run(5, 0.0);
                });

                scenario.then("it is still grounded", |world| {
                    assert_eq!(world.body.motion(), Motion::Grounded);
                });

                scenario.then("it has no vertical velocity", |world| {
                    assert_eq!(world.body.velocity().y, 0.0);
                });

                scenario.then("its bottom edge is on the floor", |world| {
                    assert_relative_eq!(world.body.bounds().bottom(), FLOOR_TOP);
                });
            });
        },
    ));
}

#[test]
fn dropped_bodies_land() {
    run_serial(&rspec::given(
        "a body released high above the floor",
        BodyWorld::dropped_from(0.0),
        |suite| {
            suite.when("it falls for two seconds", |scenario| {
                scenario.before_each(|world| {
                    *world = BodyWorld::dropped_from(0.0);
                    world.run(125, 0.0);
                });

                scenario.then("it lands instead of tunnelling through", |world| {
                    assert_eq!(world.body.motion(), Motion::Grounded);
                    assert_relative_eq!(world.body.bounds().bottom(), FLOOR_TOP);
                });
            });
        },
    ));
}

#[test]
fn walls_block_walking() {
    run_serial(&rspec::given(
        "a body walking toward a wall",
        BodyWorld::beside_wall(),
        |suite| {
            suite.when("it keeps pushing right", |scenario| {
                scenario.before_each(|world| {
                    *world = BodyWorld::beside_wall();
                    world.run(10, 700.0);
                });

                scenario.then("it stops flush against the wall", |world| {
                    assert_relative_eq!(world.body.bounds().right(), 200.0);
                });

                scenario.then("it stays on the ground", |world| {
                    assert_eq!(world.body.motion(), Motion::Grounded);
                });
            });
        },
    ));
}

#[test]
fn ledges_start_falls() {
    run_serial(&rspec::given(
        "a body walking off a short ledge",
        BodyWorld::resting(),
        |suite| {
            suite.when("it walks past the edge", |scenario| {
                scenario.before_each(|world| {
                    *world = BodyWorld {
                        body: resting_body(100.0),
                        platforms: vec![platform(0.0, FLOOR_TOP, 200.0, 10.0)],
                    };
                    world.run(20, 700.0);
                });

                scenario.then("it is falling", |world| {
                    assert_eq!(world.body.motion(), Motion::Falling);
                    assert!(world.body.velocity().y > 0.0);
                });
            });
        },
    ));
}
