//! Level content: triggers and their effects, gamemode portals, the object
//! id/activation table, the RON level format, and progress/save data.
//!
//! This crate owns everything placed along the path. It talks to the player
//! and camera crates only through `pulse-sim` events, so levels can be
//! loaded and simulated without either.

mod id;
mod level;
mod portal;
mod progress;
mod save;
mod trigger;

pub use id::ObjectIdHandler;
pub use level::{LevelDefinition, LevelError, LevelRes, PortalDef, TriggerDef};
pub use portal::{Portal, portal_respawn_system, portal_system};
pub use progress::{LevelProgress, current_percent, record_progress_system};
pub use save::{LevelSaveData, SaveError, SaveFile, default_save_path};
pub use trigger::{
    Trigger, TriggerEffect, pass_trigger_system, touch_trigger_system, trigger_respawn_system,
};
