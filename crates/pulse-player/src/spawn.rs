//! Death and respawn: turning a [`DeathEvent`] into a restored world.
//!
//! The respawn itself happens here, in one pass: the activation table and
//! the player state are restored first, then a [`RespawnEvent`] goes out so
//! triggers, portals, the camera, and the gamemode handler (all scheduled
//! after this system) can re-arm against the restored state.

use bevy_ecs::prelude::*;
use pulse_level::{LevelRes, ObjectIdHandler};
use pulse_sim::{CamState, Checkpoint, DeathEvent, PlayerState, PracticeState, RespawnEvent};
use tracing::info;

use crate::gamemode::GamemodeHandler;

/// The implicit checkpoint every attempt starts from.
fn start_checkpoint(level: &LevelRes, handler: &GamemodeHandler) -> Checkpoint {
    Checkpoint {
        position: level.path.start_position(),
        traveled_distance: 0.0,
        gamemode: handler.start_gamemode,
        upside_down: false,
        is_small: false,
        cam_state: CamState::default(),
        activated_ids: vec![],
    }
}

/// Consumes deaths and performs the respawn. In practice mode with a
/// checkpoint placed, the checkpoint is restored; otherwise the attempt
/// restarts from the level start with a cleared activation table.
pub fn death_system(
    mut deaths: EventReader<DeathEvent>,
    level: Res<LevelRes>,
    practice: Res<PracticeState>,
    handler: Res<GamemodeHandler>,
    mut ids: ResMut<ObjectIdHandler>,
    mut player: ResMut<PlayerState>,
    mut respawns: EventWriter<RespawnEvent>,
) {
    if deaths.read().next().is_none() {
        return;
    }
    let (is_practice, checkpoint) = match practice.enabled.then(|| practice.latest()).flatten() {
        Some(checkpoint) => (true, checkpoint.clone()),
        None => (false, start_checkpoint(&level, &handler)),
    };
    if is_practice {
        ids.restore(&checkpoint.activated_ids);
    } else {
        ids.clear_activations();
    }

    player.position = checkpoint.position;
    player.traveled_distance = checkpoint.traveled_distance;
    player.upside_down = checkpoint.upside_down;
    player.is_small = checkpoint.is_small;
    player.velocity_y = 0.0;
    player.dead = false;
    player.won = false;

    info!(
        practice = is_practice,
        distance = checkpoint.traveled_distance,
        "respawn"
    );
    respawns.send(RespawnEvent {
        practice: is_practice,
        checkpoint,
    });
}
