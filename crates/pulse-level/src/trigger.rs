//! Triggers: level objects that fire an effect once when the player passes
//! their path distance or touches them.
//!
//! Firing is idempotent per attempt: a fired id goes into the
//! [`ObjectIdHandler`] activation table, and respawns recompute each
//! trigger's `activated` flag from that table. Practice checkpoints restore
//! the table, so a trigger behind the checkpoint stays spent while one ahead
//! of it re-arms.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_math::EaseSettings;
use pulse_sim::{
    CameraEaseFov, CameraEaseOffset, CameraEaseRotation, CameraShake, Gamemode, GamemodeRequest,
    PlayerState, RespawnEvent,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::id::ObjectIdHandler;

/// What a trigger does when it fires.
///
/// Vector targets are plain arrays so level files stay independent of the
/// math crate's serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerEffect {
    /// Start a camera shake.
    Shake {
        /// Shake amplitude.
        strength: f32,
        /// Shakes per second.
        frequency: f32,
        /// Duration in seconds.
        length: f32,
    },
    /// Ease the camera offset to a new value.
    EaseOffset {
        /// Target offset.
        target: [f32; 3],
        /// Transition timing.
        settings: EaseSettings,
    },
    /// Ease the camera rotation to new euler angles (degrees).
    EaseRotation {
        /// Target rotation in euler degrees.
        target: [f32; 3],
        /// Transition timing.
        settings: EaseSettings,
    },
    /// Ease the camera field of view.
    EaseFov {
        /// Target fov in degrees.
        target: f32,
        /// Transition timing.
        settings: EaseSettings,
    },
    /// Set the gravity flip flag.
    FlipGravity {
        /// New upside-down flag.
        upside_down: bool,
    },
    /// Ask the gamemode handler to switch modes.
    ChangeGamemode {
        /// The mode to switch to.
        gamemode: Gamemode,
    },
}

/// A trigger placed in the level.
#[derive(Component, Debug, Clone)]
pub struct Trigger {
    /// Stable id from the [`ObjectIdHandler`].
    pub id: i64,
    /// Path distance at which a pass trigger arms.
    pub distance: f32,
    /// Touch triggers fire on proximity instead of distance.
    pub touch_triggered: bool,
    /// Proximity radius for touch triggers.
    pub touch_radius: f32,
    /// World position, used by touch triggers.
    pub position: Vec3,
    /// Already fired this attempt.
    pub activated: bool,
    /// The player has crossed this trigger's distance since the last respawn.
    pub player_has_passed: bool,
    /// The effect to fire.
    pub effect: TriggerEffect,
}

impl Trigger {
    /// Whether the trigger may fire right now.
    #[must_use]
    pub fn can_trigger(&self, player: &PlayerState) -> bool {
        !self.activated && !player.dead
    }
}

/// Single firing path shared by the pass and touch systems.
fn fire_effect(
    effect: TriggerEffect,
    player: &mut PlayerState,
    shake: &mut EventWriter<CameraShake>,
    ease_offset: &mut EventWriter<CameraEaseOffset>,
    ease_rotation: &mut EventWriter<CameraEaseRotation>,
    ease_fov: &mut EventWriter<CameraEaseFov>,
    gamemode: &mut EventWriter<GamemodeRequest>,
) {
    match effect {
        TriggerEffect::Shake {
            strength,
            frequency,
            length,
        } => {
            shake.send(CameraShake {
                strength,
                frequency,
                length,
            });
        }
        TriggerEffect::EaseOffset { target, settings } => {
            ease_offset.send(CameraEaseOffset {
                target: Vec3::from_array(target),
                settings,
            });
        }
        TriggerEffect::EaseRotation { target, settings } => {
            ease_rotation.send(CameraEaseRotation {
                target: Vec3::from_array(target),
                settings,
            });
        }
        TriggerEffect::EaseFov { target, settings } => {
            ease_fov.send(CameraEaseFov { target, settings });
        }
        TriggerEffect::FlipGravity { upside_down } => {
            player.upside_down = upside_down;
        }
        TriggerEffect::ChangeGamemode { gamemode: mode } => {
            gamemode.send(GamemodeRequest(mode));
        }
    }
}

/// Fires pass triggers whose distance the player has crossed this frame.
/// Runs in the Update stage.
#[allow(clippy::too_many_arguments)]
pub fn pass_trigger_system(
    mut triggers: Query<&mut Trigger>,
    mut player: ResMut<PlayerState>,
    mut ids: ResMut<ObjectIdHandler>,
    mut shake: EventWriter<CameraShake>,
    mut ease_offset: EventWriter<CameraEaseOffset>,
    mut ease_rotation: EventWriter<CameraEaseRotation>,
    mut ease_fov: EventWriter<CameraEaseFov>,
    mut gamemode: EventWriter<GamemodeRequest>,
) {
    for mut trigger in &mut triggers {
        if trigger.touch_triggered || trigger.player_has_passed {
            continue;
        }
        if player.traveled_distance <= trigger.distance {
            continue;
        }
        trigger.player_has_passed = true;
        if !trigger.can_trigger(&player) {
            continue;
        }
        trigger.activated = true;
        ids.activate(trigger.id);
        debug!(id = trigger.id, distance = trigger.distance, "pass trigger fired");
        fire_effect(
            trigger.effect,
            &mut player,
            &mut shake,
            &mut ease_offset,
            &mut ease_rotation,
            &mut ease_fov,
            &mut gamemode,
        );
    }
}

/// Fires touch triggers the player is close enough to. Proximity to the
/// trigger's world position stands in for a collider check. Runs in
/// FixedUpdate so fast players cannot tunnel past a radius between frames.
#[allow(clippy::too_many_arguments)]
pub fn touch_trigger_system(
    mut triggers: Query<&mut Trigger>,
    mut player: ResMut<PlayerState>,
    mut ids: ResMut<ObjectIdHandler>,
    mut shake: EventWriter<CameraShake>,
    mut ease_offset: EventWriter<CameraEaseOffset>,
    mut ease_rotation: EventWriter<CameraEaseRotation>,
    mut ease_fov: EventWriter<CameraEaseFov>,
    mut gamemode: EventWriter<GamemodeRequest>,
) {
    for mut trigger in &mut triggers {
        if !trigger.touch_triggered {
            continue;
        }
        if !trigger.can_trigger(&player) {
            continue;
        }
        if player.position.distance_squared(trigger.position)
            > trigger.touch_radius * trigger.touch_radius
        {
            continue;
        }
        trigger.activated = true;
        ids.activate(trigger.id);
        debug!(id = trigger.id, "touch trigger fired");
        fire_effect(
            trigger.effect,
            &mut player,
            &mut shake,
            &mut ease_offset,
            &mut ease_rotation,
            &mut ease_fov,
            &mut gamemode,
        );
    }
}

/// Re-arms triggers on respawn: `activated` comes back from the activation
/// table (restored or cleared before this system runs) and distance arming
/// resets so pass triggers ahead of the respawn point fire again.
pub fn trigger_respawn_system(
    mut respawns: EventReader<RespawnEvent>,
    mut triggers: Query<&mut Trigger>,
    ids: Res<ObjectIdHandler>,
) {
    if respawns.read().next().is_none() {
        return;
    }
    for mut trigger in &mut triggers {
        trigger.activated = ids.is_activated(trigger.id);
        trigger.player_has_passed = false;
    }
}
