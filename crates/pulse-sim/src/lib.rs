//! Simulation core: schedule stages and runner, the time resource, shared
//! state types, typed events, and the world factory.
//!
//! Everything the gameplay crates (`pulse-level`, `pulse-player`,
//! `pulse-camera`) exchange lives here so they can depend on a single hub
//! instead of each other.

mod events;
mod schedule;
mod state;
mod time;
mod world;

pub use events::{
    CameraEaseFov, CameraEaseOffset, CameraEaseRotation, CameraShake, DeathEvent, GamemodeChanged,
    GamemodeRequest, GravityChanged, RespawnEvent, SizeChanged, WinEvent, register_events,
    update_events,
};
pub use schedule::{MAX_FRAME_TIME, SimSchedules, SimStage};
pub use state::{
    BorderState, CamState, Checkpoint, Gamemode, InputSnapshot, PlayerState, PracticeState,
};
pub use time::TimeRes;
pub use world::{create_world, register_core_resources};
