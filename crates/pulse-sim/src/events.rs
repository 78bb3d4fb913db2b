//! Typed events replacing direct callback wiring between subsystems.
//!
//! Events are double-buffered [`Events`] queues; [`update_events`] swaps the
//! buffers once per frame (the runner calls it at frame start), so an event
//! sent during frame N is readable for the rest of frame N and all of N+1.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_math::EaseSettings;

use crate::state::{Checkpoint, Gamemode};

/// The player died.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent;

/// The player is respawning.
///
/// `checkpoint` carries the restore target; non-practice respawns ignore it
/// and reset to level-start values instead.
#[derive(Event, Debug, Clone)]
pub struct RespawnEvent {
    /// Whether this respawn restores a practice checkpoint.
    pub practice: bool,
    /// The checkpoint to restore in practice mode.
    pub checkpoint: Checkpoint,
}

/// The player reached the end of the path. Emitted once per attempt.
#[derive(Event, Debug, Clone, Copy)]
pub struct WinEvent;

/// Gravity flipped; payload is the new upside-down flag.
#[derive(Event, Debug, Clone, Copy)]
pub struct GravityChanged(pub bool);

/// Player size changed; payload is the new is-small flag.
#[derive(Event, Debug, Clone, Copy)]
pub struct SizeChanged(pub bool);

/// A level object asks the gamemode handler to switch modes.
#[derive(Event, Debug, Clone, Copy)]
pub struct GamemodeRequest(pub Gamemode);

/// The gamemode handler switched modes.
#[derive(Event, Debug, Clone, Copy)]
pub struct GamemodeChanged(pub Gamemode);

/// Start a camera shake.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraShake {
    /// Shake amplitude.
    pub strength: f32,
    /// Shakes per second.
    pub frequency: f32,
    /// Duration in seconds.
    pub length: f32,
}

/// Ease the camera offset to a new target.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraEaseOffset {
    /// Target offset.
    pub target: Vec3,
    /// Transition timing.
    pub settings: EaseSettings,
}

/// Ease the camera rotation to new euler angles (degrees).
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraEaseRotation {
    /// Target rotation in euler degrees.
    pub target: Vec3,
    /// Transition timing.
    pub settings: EaseSettings,
}

/// Ease the camera field of view to a new value.
///
/// The camera clamps the target to its valid fov range before animating.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraEaseFov {
    /// Target fov in degrees.
    pub target: f32,
    /// Transition timing.
    pub settings: EaseSettings,
}

/// Registers every event queue on the world.
pub fn register_events(world: &mut World) {
    world.init_resource::<Events<DeathEvent>>();
    world.init_resource::<Events<RespawnEvent>>();
    world.init_resource::<Events<WinEvent>>();
    world.init_resource::<Events<GravityChanged>>();
    world.init_resource::<Events<SizeChanged>>();
    world.init_resource::<Events<GamemodeRequest>>();
    world.init_resource::<Events<GamemodeChanged>>();
    world.init_resource::<Events<CameraShake>>();
    world.init_resource::<Events<CameraEaseOffset>>();
    world.init_resource::<Events<CameraEaseRotation>>();
    world.init_resource::<Events<CameraEaseFov>>();
}

/// Swaps the double buffers of every event queue. Called once per frame by
/// the schedule runner before any stage runs.
pub fn update_events(world: &mut World) {
    fn update<E: Event>(world: &mut World) {
        if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
            events.update();
        }
    }
    update::<DeathEvent>(world);
    update::<RespawnEvent>(world);
    update::<WinEvent>(world);
    update::<GravityChanged>(world);
    update::<SizeChanged>(world);
    update::<GamemodeRequest>(world);
    update::<GamemodeChanged>(world);
    update::<CameraShake>(world);
    update::<CameraEaseOffset>(world);
    update::<CameraEaseRotation>(world);
    update::<CameraEaseFov>(world);
}
