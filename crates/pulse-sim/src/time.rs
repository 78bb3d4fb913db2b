//! Time resource for the simulation world.

use bevy_ecs::prelude::*;

/// Global time resource inserted into the world at creation.
///
/// The schedule runner writes it each frame; systems read timing from here
/// instead of receiving it as a function parameter.
#[derive(Resource, Debug, Clone)]
pub struct TimeRes {
    /// Wall-clock seconds elapsed since the previous frame.
    pub delta: f32,
    /// Fixed simulation timestep in seconds.
    pub fixed_delta: f32,
    /// Total simulated seconds since the world was created.
    pub elapsed: f64,
    /// Number of fixed simulation ticks executed so far.
    pub tick: u64,
}

impl Default for TimeRes {
    fn default() -> Self {
        Self {
            delta: 0.0,
            fixed_delta: 1.0 / 60.0,
            elapsed: 0.0,
            tick: 0,
        }
    }
}
