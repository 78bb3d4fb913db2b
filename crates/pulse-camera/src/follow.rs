//! Follow behaviour: fixed-tick Y tracking and the late-update compose
//! pass, plus the respawn handler.
//!
//! X and Z copy the player every late-update tick. Y is softer: while the
//! player stays inside a window around the camera it is tracked directly,
//! and once it leaves (or borders lock the view) the target Y chases it a
//! bounded step per fixed tick, with the tracked Y blending toward the
//! target for an extra layer of smoothing.

use bevy_ecs::prelude::*;
use pulse_math::{lerp, move_towards};
use pulse_sim::{BorderState, PlayerState, RespawnEvent};

use crate::behaviour::CameraBehaviour;
use crate::ease::EaseManager;

/// Fixed-tick Y tracking. Runs in FixedUpdate.
pub fn camera_y_system(
    player: Res<PlayerState>,
    borders: Res<BorderState>,
    mut camera: ResMut<CameraBehaviour>,
) {
    if borders.active {
        camera.y_lock_pos = borders.lock_y();
        let max_delta = camera.tuning.y_max_delta;
        camera.target_y = move_towards(camera.target_y, camera.y_lock_pos, max_delta);
    } else {
        let player_y = player.position.y;
        let in_window = player_y >= camera.position.y + camera.tuning.limit_y_min
            && player_y <= camera.position.y + camera.tuning.limit_y_max;
        if in_window {
            camera.target_y = player_y;
        } else {
            let max_delta = camera.tuning.y_max_delta;
            camera.target_y = move_towards(camera.target_y, player_y, max_delta);
        }
    }
    let blend = camera.tuning.y_lerp_delta;
    camera.position.y = lerp(camera.position.y, camera.target_y, blend);
}

/// Late compose pass. Runs in PostUpdate, after everything that moves the
/// player or the camera this frame.
pub fn camera_late_system(player: Res<PlayerState>, mut camera: ResMut<CameraBehaviour>) {
    camera.position.x = player.position.x;
    camera.position.z = player.position.z;
    camera.final_position = camera.position + camera.offset + camera.shake_offset;
}

/// Respawn handling: practice restores the checkpoint's camera snapshot
/// verbatim; a fresh attempt hard-resets to level-start values. Either way
/// every running ease is cancelled.
pub fn camera_respawn_system(
    mut respawns: EventReader<RespawnEvent>,
    mut camera: ResMut<CameraBehaviour>,
    mut eases: ResMut<EaseManager>,
) {
    for respawn in respawns.read() {
        eases.cancel_all();
        camera.offset_ease = None;
        camera.rotation_ease = None;
        camera.fov_ease = None;
        if respawn.practice {
            camera.restore(&respawn.checkpoint.cam_state);
        } else {
            camera.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::system::RunSystemOnce;
    use glam::Vec3;
    use pulse_sim::{CamState, Checkpoint, Gamemode, create_world};

    fn test_world() -> World {
        let mut world = create_world();
        world.insert_resource(CameraBehaviour::default());
        world.init_resource::<EaseManager>();
        world
    }

    #[test]
    fn test_y_inside_window_tracks_directly() {
        let mut world = test_world();
        {
            let mut camera = world.resource_mut::<CameraBehaviour>();
            camera.position = Vec3::ZERO;
            camera.target_y = 0.0;
        }
        world.resource_mut::<PlayerState>().position = Vec3::new(0.0, 1.0, 0.0);
        world.run_system_once(camera_y_system).unwrap();
        let camera = world.resource::<CameraBehaviour>();
        assert_eq!(camera.target_y, 1.0);
        // Tracked Y blends, it does not snap.
        assert!(camera.position.y > 0.0 && camera.position.y < 1.0);
    }

    #[test]
    fn test_y_outside_window_is_rate_limited() {
        let mut world = test_world();
        {
            let mut camera = world.resource_mut::<CameraBehaviour>();
            camera.position = Vec3::ZERO;
            camera.target_y = 0.0;
        }
        world.resource_mut::<PlayerState>().position = Vec3::new(0.0, 10.0, 0.0);
        world.run_system_once(camera_y_system).unwrap();
        let camera = world.resource::<CameraBehaviour>();
        assert_eq!(camera.target_y, camera.tuning.y_max_delta);
    }

    #[test]
    fn test_borders_lock_y_to_their_centre() {
        let mut world = test_world();
        world.resource_mut::<BorderState>().apply(0.0, 10.0);
        world.resource_mut::<PlayerState>().position = Vec3::new(0.0, 9.0, 0.0);

        for _ in 0..200 {
            world.run_system_once(camera_y_system).unwrap();
        }
        let camera = world.resource::<CameraBehaviour>();
        assert!((camera.position.y - 5.0).abs() < 0.01);
        assert_eq!(camera.y_lock_pos, 5.0);
    }

    #[test]
    fn test_late_compose_tracks_x_and_z_exactly() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().position = Vec3::new(42.0, 3.0, -7.0);
        world.run_system_once(camera_late_system).unwrap();
        let camera = world.resource::<CameraBehaviour>();
        assert_eq!(camera.position.x, 42.0);
        assert_eq!(camera.position.z, -7.0);
        assert_eq!(
            camera.final_position,
            camera.position + camera.offset + camera.shake_offset
        );
    }

    #[test]
    fn test_practice_respawn_restores_camera_snapshot() {
        let mut world = test_world();
        let saved = CamState {
            position: Vec3::new(30.0, 4.0, 0.0),
            offset: Vec3::new(2.0, 2.0, -12.0),
            rotation: Vec3::new(5.0, 0.0, 0.0),
            shake_strength: 0.3,
            shake_frequency: 20.0,
            shake_frequency_timer: 0.01,
            shake_length: 1.0,
            shake_length_timer: 0.4,
            fov: 80.0,
            y_lock_pos: 5.0,
        };
        world.send_event(RespawnEvent {
            practice: true,
            checkpoint: Checkpoint {
                position: Vec3::new(30.0, 0.0, 0.0),
                traveled_distance: 30.0,
                gamemode: Gamemode::Ship,
                upside_down: false,
                is_small: false,
                cam_state: saved,
                activated_ids: vec![],
            },
        });
        world.run_system_once(camera_respawn_system).unwrap();
        let camera = world.resource::<CameraBehaviour>();
        assert_eq!(camera.save(), saved);
    }

    #[test]
    fn test_fresh_respawn_cancels_eases_and_resets() {
        let mut world = test_world();
        let id = world.resource_mut::<EaseManager>().start(
            crate::ease::EaseKind::Fov {
                from: 60.0,
                to: 100.0,
            },
            pulse_math::EaseSettings::default(),
        );
        {
            let mut camera = world.resource_mut::<CameraBehaviour>();
            camera.fov_ease = Some(id);
            camera.fov = 100.0;
        }
        world.send_event(RespawnEvent {
            practice: false,
            checkpoint: Checkpoint {
                position: Vec3::ZERO,
                traveled_distance: 0.0,
                gamemode: Gamemode::Cube,
                upside_down: false,
                is_small: false,
                cam_state: CamState::default(),
                activated_ids: vec![],
            },
        });
        world.run_system_once(camera_respawn_system).unwrap();
        let camera = world.resource::<CameraBehaviour>();
        assert_eq!(camera.fov, 60.0);
        assert!(camera.fov_ease.is_none());
        assert!(world.resource::<EaseManager>().is_empty());
    }
}
