//! Simulation stage labels and the ordered schedule runner.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoSystemConfigs, ScheduleLabel};

use crate::events::update_events;
use crate::time::TimeRes;

/// Maximum number of fixed-update steps per frame to prevent spiral-of-death.
const MAX_FIXED_STEPS_PER_FRAME: u32 = 10;

/// Maximum frame time accepted by [`SimSchedules::run`]; longer frames are
/// clamped and the simulation accepts slowdown instead of catching up with
/// dozens of steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Labels for each simulation stage.
///
/// Stages run in the order listed, top to bottom, every frame.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimStage {
    /// Input resolution and other once-per-frame bookkeeping.
    PreUpdate,
    /// Deterministic simulation at 60 Hz (movement, camera Y smoothing,
    /// touch triggers).
    FixedUpdate,
    /// Variable-rate gameplay logic (pass triggers, shake timers, respawn
    /// handling).
    Update,
    /// Late camera composition after everything has moved.
    PostUpdate,
}

/// Ordered collection of [`Schedule`]s that drives one simulation frame.
///
/// `FixedUpdate` uses a time-accumulator pattern to tick at a stable 60 Hz
/// regardless of the actual frame rate.
pub struct SimSchedules {
    schedules: Vec<(SimStage, Schedule)>,
    fixed_accumulator: f64,
    fixed_dt: f64,
}

impl SimSchedules {
    /// Create a new set of schedules with the default fixed timestep (1/60 s).
    #[must_use]
    pub fn new() -> Self {
        let stages = vec![
            SimStage::PreUpdate,
            SimStage::FixedUpdate,
            SimStage::Update,
            SimStage::PostUpdate,
        ];

        let schedules = stages
            .into_iter()
            .map(|label| (label, Schedule::default()))
            .collect();

        Self {
            schedules,
            fixed_accumulator: 0.0,
            fixed_dt: 1.0 / 60.0,
        }
    }

    /// Register a system (or system tuple) into a specific stage.
    pub fn add_systems<M>(&mut self, stage: SimStage, systems: impl IntoSystemConfigs<M>) {
        for (label, schedule) in &mut self.schedules {
            if *label == stage {
                schedule.add_systems(systems);
                return;
            }
        }
        panic!("Unknown stage: {stage:?}");
    }

    /// Run all stages in order for one frame.
    ///
    /// `FixedUpdate` may run 0–`MAX_FIXED_STEPS_PER_FRAME` times based on
    /// accumulated delta time. All other stages run exactly once. Event
    /// queues swap at the start of the frame.
    pub fn run(&mut self, world: &mut World, frame_dt: f64) {
        let frame_dt = frame_dt.min(MAX_FRAME_TIME);

        update_events(world);

        if let Some(mut time) = world.get_resource_mut::<TimeRes>() {
            time.delta = frame_dt as f32;
            time.fixed_delta = self.fixed_dt as f32;
        }

        self.run_stage(SimStage::PreUpdate, world);

        self.fixed_accumulator += frame_dt;
        let mut steps: u32 = 0;
        while self.fixed_accumulator >= self.fixed_dt && steps < MAX_FIXED_STEPS_PER_FRAME {
            if let Some(mut time) = world.get_resource_mut::<TimeRes>() {
                time.elapsed += self.fixed_dt;
                time.tick += 1;
            }
            self.run_stage(SimStage::FixedUpdate, world);
            self.fixed_accumulator -= self.fixed_dt;
            steps += 1;
        }

        self.run_stage(SimStage::Update, world);
        self.run_stage(SimStage::PostUpdate, world);
    }

    /// Advance exactly one fixed step plus the surrounding frame stages.
    /// Tests use this to step deterministically tick by tick.
    pub fn step(&mut self, world: &mut World) {
        self.run(world, self.fixed_dt);
    }

    /// Returns the fixed timestep in seconds (default 1/60).
    #[must_use]
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    fn run_stage(&mut self, stage: SimStage, world: &mut World) {
        for (label, schedule) in &mut self.schedules {
            if *label == stage {
                schedule.run(world);
                return;
            }
        }
    }
}

impl Default for SimSchedules {
    fn default() -> Self {
        Self::new()
    }
}
