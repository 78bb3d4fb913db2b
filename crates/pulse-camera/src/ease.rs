//! Timed camera transitions: the ease manager and the systems that start
//! and advance eases.
//!
//! Each of the three channels (offset, rotation, fov) holds at most one
//! ease. Starting a new one on a busy channel cancels the old mid-flight
//! and eases from the camera's current value, so chained triggers blend
//! instead of jumping.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_math::{EaseSettings, lerp};
use pulse_sim::{CameraEaseFov, CameraEaseOffset, CameraEaseRotation, TimeRes};
use tracing::debug;

use crate::behaviour::{CameraBehaviour, MAX_FOV, MIN_FOV};

/// What an ease animates.
#[derive(Debug, Clone, Copy)]
pub enum EaseKind {
    /// Camera offset.
    Offset {
        /// Value at ease start.
        from: Vec3,
        /// Target value.
        to: Vec3,
    },
    /// Camera rotation, euler degrees.
    Rotation {
        /// Value at ease start.
        from: Vec3,
        /// Target value.
        to: Vec3,
    },
    /// Field of view, degrees.
    Fov {
        /// Value at ease start.
        from: f32,
        /// Target value.
        to: f32,
    },
}

/// One running ease.
#[derive(Debug, Clone, Copy)]
pub struct EaseInstance {
    /// Handle held by the camera's channel.
    pub id: i64,
    /// What is animated, and between which values.
    pub kind: EaseKind,
    /// Timing.
    pub settings: EaseSettings,
    /// Seconds since the ease started.
    pub elapsed: f32,
}

/// Owns every running ease and hands out channel ids.
#[derive(Resource, Debug, Default)]
pub struct EaseManager {
    next_id: i64,
    instances: Vec<EaseInstance>,
}

impl EaseManager {
    /// Start an ease and return its id.
    pub fn start(&mut self, kind: EaseKind, settings: EaseSettings) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.instances.push(EaseInstance {
            id,
            kind,
            settings,
            elapsed: 0.0,
        });
        id
    }

    /// Drop the ease with `id`, if it is still running.
    pub fn cancel(&mut self, id: i64) {
        self.instances.retain(|inst| inst.id != id);
    }

    /// Drop every running ease.
    pub fn cancel_all(&mut self) {
        self.instances.clear();
    }

    /// Number of running eases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no ease is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Starts eases requested by trigger events. A request on a busy channel
/// replaces the running ease.
pub fn ease_command_system(
    mut offset_events: EventReader<CameraEaseOffset>,
    mut rotation_events: EventReader<CameraEaseRotation>,
    mut fov_events: EventReader<CameraEaseFov>,
    mut camera: ResMut<CameraBehaviour>,
    mut eases: ResMut<EaseManager>,
) {
    for event in offset_events.read() {
        if let Some(old) = camera.offset_ease.take() {
            eases.cancel(old);
        }
        let kind = EaseKind::Offset {
            from: camera.offset,
            to: event.target,
        };
        camera.offset_ease = Some(eases.start(kind, event.settings));
        debug!(target = ?event.target, "offset ease started");
    }
    for event in rotation_events.read() {
        if let Some(old) = camera.rotation_ease.take() {
            eases.cancel(old);
        }
        let kind = EaseKind::Rotation {
            from: camera.rotation,
            to: event.target,
        };
        camera.rotation_ease = Some(eases.start(kind, event.settings));
        debug!(target = ?event.target, "rotation ease started");
    }
    for event in fov_events.read() {
        if let Some(old) = camera.fov_ease.take() {
            eases.cancel(old);
        }
        let kind = EaseKind::Fov {
            from: camera.fov,
            to: event.target.clamp(MIN_FOV, MAX_FOV),
        };
        camera.fov_ease = Some(eases.start(kind, event.settings));
        debug!(target = event.target, "fov ease started");
    }
}

/// Advances running eases and writes their sampled values to the camera.
/// Finished eases are removed and their channels cleared.
pub fn ease_update_system(
    time: Res<TimeRes>,
    mut eases: ResMut<EaseManager>,
    mut camera: ResMut<CameraBehaviour>,
) {
    let mut finished = Vec::new();
    for inst in &mut eases.instances {
        inst.elapsed += time.delta;
        let t = inst.settings.sample(inst.elapsed);
        match inst.kind {
            EaseKind::Offset { from, to } => camera.offset = from.lerp(to, t),
            EaseKind::Rotation { from, to } => camera.rotation = from.lerp(to, t),
            EaseKind::Fov { from, to } => camera.fov = lerp(from, to, t),
        }
        if inst.elapsed >= inst.settings.duration {
            finished.push(inst.id);
        }
    }
    for id in finished {
        eases.cancel(id);
        camera.clear_ease(id);
    }
}
