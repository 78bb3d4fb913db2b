//! Shared state types: gamemode tag, camera snapshot, checkpoint, and the
//! resources every gameplay crate reads.

use bevy_ecs::prelude::*;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The player's movement mode. Owned by the gamemode handler; everyone else
/// treats it as an opaque tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gamemode {
    /// No active behaviour; forwarding to it is a no-op.
    None,
    /// Ground-bound mode: gravity plus tap-to-jump.
    #[default]
    Cube,
    /// Airborne mode: hold-to-climb.
    Ship,
}

/// A snapshot of the camera at a point in time.
///
/// Saved into checkpoints and restored verbatim on practice respawns,
/// including the shake phase so a respawn mid-shake continues the shake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CamState {
    /// Tracked camera position (before offset and shake are applied).
    pub position: Vec3,
    /// Offset from the follow target.
    pub offset: Vec3,
    /// Camera orientation as euler angles in degrees.
    pub rotation: Vec3,
    /// Shake amplitude.
    pub shake_strength: f32,
    /// Shakes per second.
    pub shake_frequency: f32,
    /// Seconds until the next shake offset refresh.
    pub shake_frequency_timer: f32,
    /// Total shake duration in seconds.
    pub shake_length: f32,
    /// Seconds of shake remaining.
    pub shake_length_timer: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Y position the camera locks to while borders are active.
    pub y_lock_pos: f32,
}

impl Default for CamState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
            shake_strength: 0.0,
            shake_frequency: 0.0,
            shake_frequency_timer: 0.0,
            shake_length: 0.0,
            shake_length_timer: 0.0,
            fov: 60.0,
            y_lock_pos: 0.0,
        }
    }
}

/// Everything needed to put the world back the way it was when a practice
/// checkpoint was placed. Restoring is atomic: all fields apply together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checkpoint {
    /// Player world position.
    pub position: Vec3,
    /// Player progress along the path.
    pub traveled_distance: f32,
    /// Active gamemode at capture time.
    pub gamemode: Gamemode,
    /// Gravity flip flag.
    pub upside_down: bool,
    /// Size flag.
    pub is_small: bool,
    /// Full camera snapshot.
    pub cam_state: CamState,
    /// Trigger ids already activated in this attempt.
    pub activated_ids: Vec<i64>,
}

/// The player's core state resource.
///
/// `traveled_distance` is monotonic non-decreasing while alive and is the
/// source of truth for trigger evaluation and percent scoring.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerState {
    /// World position.
    pub position: Vec3,
    /// Vertical velocity, units per second. Positive is up (pre-flip).
    pub velocity_y: f32,
    /// Progress along the level path.
    pub traveled_distance: f32,
    /// Dead players stop moving and stop receiving gamemode forwarding.
    pub dead: bool,
    /// Set once the end of the path is reached; cleared on respawn.
    pub won: bool,
    /// Gravity flip flag.
    pub upside_down: bool,
    /// Size flag.
    pub is_small: bool,
}

impl PlayerState {
    /// Gravity direction multiplier: -1 while upside down, +1 otherwise.
    #[must_use]
    pub fn gravity_multiplier(&self) -> f32 {
        if self.upside_down { -1.0 } else { 1.0 }
    }
}

/// Practice-mode flag and the checkpoint stack.
#[derive(Resource, Debug, Clone, Default)]
pub struct PracticeState {
    /// Whether practice mode is on.
    pub enabled: bool,
    /// Placed checkpoints, oldest first.
    pub checkpoints: Vec<Checkpoint>,
}

impl PracticeState {
    /// The most recently placed checkpoint, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// Remove and discard the most recent checkpoint.
    pub fn remove_latest(&mut self) {
        self.checkpoints.pop();
    }
}

/// Camera Y borders applied by portals.
#[derive(Resource, Debug, Clone, Default)]
pub struct BorderState {
    /// Whether borders are currently active.
    pub active: bool,
    /// Lower border Y.
    pub min_y: f32,
    /// Upper border Y.
    pub max_y: f32,
}

impl BorderState {
    /// Highest Y a border may reach.
    pub const MAX_HEIGHT: f32 = 60.0;

    /// Activate borders with the given range.
    pub fn apply(&mut self, min_y: f32, max_y: f32) {
        self.active = true;
        self.min_y = min_y;
        self.max_y = max_y;
    }

    /// Deactivate borders.
    pub fn remove(&mut self) {
        self.active = false;
    }

    /// The Y the camera locks to while borders are active (their centre).
    #[must_use]
    pub fn lock_y(&self) -> f32 {
        (self.min_y + self.max_y) / 2.0
    }
}

/// Per-frame gameplay input, resolved from the binding layer by the loop
/// driver. Written in PreUpdate, read by FixedUpdate and Update.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputSnapshot {
    /// The click binding is held.
    pub click_held: bool,
    /// The click binding was pressed this frame.
    pub click_down: bool,
    /// The click binding was released this frame.
    pub click_up: bool,
    /// Place-checkpoint binding pressed this frame.
    pub place_checkpoint: bool,
    /// Remove-checkpoint binding pressed this frame.
    pub remove_checkpoint: bool,
    /// Toggle-practice binding pressed this frame.
    pub toggle_practice: bool,
}
