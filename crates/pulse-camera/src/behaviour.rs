//! The camera resource: tracked position, offset, rotation, fov, shake
//! phase, ease channel handles, and the level-start values respawns fall
//! back to.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_sim::CamState;

/// Smallest legal vertical field of view in degrees.
pub const MIN_FOV: f32 = 1.0;
/// Largest legal vertical field of view in degrees.
pub const MAX_FOV: f32 = 179.0;

/// Static camera tuning, filled in from the config file.
#[derive(Debug, Clone, Copy)]
pub struct CameraTuning {
    /// Offset from the follow target.
    pub offset: Vec3,
    /// Extra offset applied to the tracked position at level start.
    pub extra_start_offset: Vec3,
    /// Rotation as euler angles in degrees.
    pub rotation: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Lower edge of the free-follow window, relative to the camera Y.
    pub limit_y_min: f32,
    /// Upper edge of the free-follow window, relative to the camera Y.
    pub limit_y_max: f32,
    /// Max Y movement of the follow target per fixed tick.
    pub y_max_delta: f32,
    /// Blend factor for the tracked Y each fixed tick.
    pub y_lerp_delta: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset: Vec3::new(6.0, 3.5, -10.0),
            extra_start_offset: Vec3::new(0.0, -1.0, 0.0),
            rotation: Vec3::new(15.0, 0.0, 0.0),
            fov: 60.0,
            limit_y_min: -2.0,
            limit_y_max: 2.0,
            y_max_delta: 0.2,
            y_lerp_delta: 0.3,
        }
    }
}

/// The camera's live state.
///
/// `position` is the tracked follow point; the composed `final_position`
/// (position + offset + shake) is what a renderer would place the camera at.
#[derive(Resource, Debug, Clone)]
pub struct CameraBehaviour {
    /// Tracked follow position.
    pub position: Vec3,
    /// The Y the tracked position is converging on.
    pub target_y: f32,
    /// Offset from the follow target.
    pub offset: Vec3,
    /// Rotation as euler angles in degrees.
    pub rotation: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// The Y the camera locks to while borders are active.
    pub y_lock_pos: f32,

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
    /// Current random shake offset.
    pub shake_offset: Vec3,

    /// Composed world position: tracked position + offset + shake.
    pub final_position: Vec3,

    /// Active ease on the offset channel.
    pub offset_ease: Option<i64>,
    /// Active ease on the rotation channel.
    pub rotation_ease: Option<i64>,
    /// Active ease on the fov channel.
    pub fov_ease: Option<i64>,

    /// Tuning from the config file; also holds the level-start
    /// offset/rotation/fov.
    pub tuning: CameraTuning,
    /// Tracked position at level start.
    pub start_position: Vec3,
}

impl CameraBehaviour {
    /// Build a camera at the level-start follow point.
    #[must_use]
    pub fn new(tuning: CameraTuning, start_position: Vec3) -> Self {
        let position = start_position + tuning.extra_start_offset;
        Self {
            position,
            target_y: position.y,
            offset: tuning.offset,
            rotation: tuning.rotation,
            fov: tuning.fov.clamp(MIN_FOV, MAX_FOV),
            y_lock_pos: 0.0,
            shake_strength: 0.0,
            shake_frequency: 0.0,
            shake_frequency_timer: 0.0,
            shake_length: 0.0,
            shake_length_timer: 0.0,
            shake_offset: Vec3::ZERO,
            final_position: position + tuning.offset,
            offset_ease: None,
            rotation_ease: None,
            fov_ease: None,
            tuning,
            start_position,
        }
    }

    /// Snapshot the fields a practice checkpoint preserves.
    #[must_use]
    pub fn save(&self) -> CamState {
        CamState {
            position: self.position,
            offset: self.offset,
            rotation: self.rotation,
            shake_strength: self.shake_strength,
            shake_frequency: self.shake_frequency,
            shake_frequency_timer: self.shake_frequency_timer,
            shake_length: self.shake_length,
            shake_length_timer: self.shake_length_timer,
            fov: self.fov,
            y_lock_pos: self.y_lock_pos,
        }
    }

    /// Restore a checkpoint snapshot verbatim, shake phase included.
    pub fn restore(&mut self, state: &CamState) {
        self.position = state.position;
        self.target_y = state.position.y;
        self.offset = state.offset;
        self.rotation = state.rotation;
        self.shake_strength = state.shake_strength;
        self.shake_frequency = state.shake_frequency;
        self.shake_frequency_timer = state.shake_frequency_timer;
        self.shake_length = state.shake_length;
        self.shake_length_timer = state.shake_length_timer;
        self.fov = state.fov;
        self.y_lock_pos = state.y_lock_pos;
        self.shake_offset = Vec3::ZERO;
    }

    /// Hard-reset to level-start values. Used on non-practice respawns.
    pub fn reset(&mut self) {
        let position = self.start_position + self.tuning.extra_start_offset;
        self.position = position;
        self.target_y = position.y;
        self.offset = self.tuning.offset;
        self.rotation = self.tuning.rotation;
        self.fov = self.tuning.fov.clamp(MIN_FOV, MAX_FOV);
        self.y_lock_pos = 0.0;
        self.stop_shake();
    }

    /// Zero out the shake state.
    pub fn stop_shake(&mut self) {
        self.shake_strength = 0.0;
        self.shake_frequency = 0.0;
        self.shake_frequency_timer = 0.0;
        self.shake_length = 0.0;
        self.shake_length_timer = 0.0;
        self.shake_offset = Vec3::ZERO;
    }

    /// Forget the ease on whichever channel holds `id`. Called when an ease
    /// finishes so the channel is free for the next one.
    pub fn clear_ease(&mut self, id: i64) {
        if self.offset_ease == Some(id) {
            self.offset_ease = None;
        }
        if self.rotation_ease == Some(id) {
            self.rotation_ease = None;
        }
        if self.fov_ease == Some(id) {
            self.fov_ease = None;
        }
    }
}

impl Default for CameraBehaviour {
    fn default() -> Self {
        Self::new(CameraTuning::default(), Vec3::ZERO)
    }
}
