//! Bevy plugin hosting the arena simulation.
//!
//! The arena is plain Rust state; this module wraps it in a [`Simulation`]
//! resource and advances it once per `Update` using Bevy's frame time. The
//! plugin needs no window and runs under `MinimalPlugins`, which is how the
//! integration tests drive it.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, error, info};
use thiserror::Error;

use crate::arena::{Arena, CombatEvent, FrameReport, Outcome};
use crate::clock::FrameClock;
use crate::config::Tuning;
use crate::input::InputSnapshot;
use crate::level::LevelDesc;

/// Simulation state shared with the presentation layer.
#[derive(Resource, Debug)]
pub struct Simulation {
    arena: Arena,
    clock: FrameClock,
    input: InputSnapshot,
    last_report: FrameReport,
}

impl Simulation {
    /// Wraps an arena with a running clock and no input held.
    #[must_use]
    pub fn new(arena: Arena, clock: FrameClock) -> Self {
        Self {
            arena,
            clock,
            input: InputSnapshot::default(),
            last_report: FrameReport::default(),
        }
    }

    /// The simulated arena.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The frame clock.
    #[must_use]
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Mutable access to the frame clock for pause and focus handling.
    pub const fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Input used by the next step.
    #[must_use]
    pub const fn input(&self) -> InputSnapshot {
        self.input
    }

    /// Replaces the input used by the next step.
    pub const fn set_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    /// Report of the most recent step.
    #[must_use]
    pub const fn last_report(&self) -> &FrameReport {
        &self.last_report
    }

    /// Advances the arena by a raw frame delta. Returns `false` when the
    /// clock is stopped and nothing moved.
    pub fn advance(&mut self, raw_delta: f32) -> bool {
        let Some(dt) = self.clock.advance(raw_delta) else {
            return false;
        };
        self.last_report = self.arena.step(dt, &self.input);
        true
    }
}

/// Ordering of simulation-related systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Host input is written into [`Simulation`].
    Input,
    /// The arena advances.
    Step,
    /// Presentation reads the new state.
    Sync,
}

/// Observer event carrying one [`CombatEvent`] from the last step.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatOccurred(pub CombatEvent);

/// Where a simulation failure surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationErrorContext {
    /// Building the arena from the level and tuning.
    Init,
}

/// Raised when the simulation cannot be set up.
#[derive(Event, Debug, Clone, Error)]
#[error("{context:?}: {detail}")]
pub struct SimulationError {
    /// Where the failure occurred.
    pub context: SimulationErrorContext,
    /// Description of the underlying error.
    pub detail: String,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_simulation_error(event: On<SimulationError>) {
    let SimulationError { context, detail } = event.event();
    error!("simulation error during {context:?}: {detail}");
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_combat_event(event: On<CombatOccurred>) {
    match event.event().0 {
        CombatEvent::PlayerDefeated => info!("player defeated"),
        other => debug!("combat: {other:?}"),
    }
}

/// Advances the [`Simulation`] by Bevy's frame delta and publishes the
/// resulting combat events.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn step_simulation_system(
    time: Res<Time>,
    mut simulation: ResMut<Simulation>,
    mut commands: Commands,
) {
    let before = simulation.arena().outcome();
    if !simulation.advance(time.delta_secs()) {
        return;
    }
    for event in &simulation.last_report().events {
        commands.trigger(CombatOccurred(*event));
    }
    let after = simulation.arena().outcome();
    if before == Outcome::Ongoing && after == Outcome::Victory {
        info!("all enemies defeated on frame {}", simulation.arena().frame());
    }
}

/// Plugin that builds the arena and steps it every frame.
#[derive(Debug, Clone, Default)]
pub struct SimulationPlugin {
    level: LevelDesc,
    tuning: Tuning,
}

impl SimulationPlugin {
    /// A plugin simulating `level` with `tuning`.
    #[must_use]
    pub const fn new(level: LevelDesc, tuning: Tuning) -> Self {
        Self { level, tuning }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_simulation_error);
        app.add_observer(log_combat_event);

        let arena = match Arena::from_level(&self.level, &self.tuning) {
            Ok(arena) => arena,
            Err(e) => {
                app.world_mut().trigger(SimulationError {
                    context: SimulationErrorContext::Init,
                    detail: e.to_string(),
                });
                return;
            }
        };

        app.insert_resource(Simulation::new(
            arena,
            FrameClock::new(self.tuning.clock.max_delta),
        ));
        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Step,
                SimulationSet::Sync,
            )
                .chain(),
        );
        app.add_systems(Update, step_simulation_system.in_set(SimulationSet::Step));
    }
}
