//! Practice mode: toggling, and placing/removing checkpoints.
//!
//! Placing captures the whole [`Checkpoint`] atomically: player state,
//! gamemode, camera snapshot, and the trigger activation set all come from
//! the same frame.

use bevy_ecs::prelude::*;
use pulse_camera::CameraBehaviour;
use pulse_level::ObjectIdHandler;
use pulse_sim::{Checkpoint, DeathEvent, InputSnapshot, PlayerState, PracticeState};
use tracing::info;

use crate::gamemode::GamemodeHandler;

/// Handles the practice-mode bindings. Leaving practice clears the
/// checkpoint stack and restarts the attempt as a normal run.
pub fn practice_system(
    input: Res<InputSnapshot>,
    player: Res<PlayerState>,
    handler: Res<GamemodeHandler>,
    camera: Res<CameraBehaviour>,
    ids: Res<ObjectIdHandler>,
    mut practice: ResMut<PracticeState>,
    mut deaths: EventWriter<DeathEvent>,
) {
    if input.toggle_practice {
        practice.enabled = !practice.enabled;
        info!(enabled = practice.enabled, "practice mode toggled");
        if !practice.enabled {
            practice.checkpoints.clear();
            deaths.send(DeathEvent);
            return;
        }
    }
    if !practice.enabled || player.dead {
        return;
    }
    if input.place_checkpoint {
        let checkpoint = Checkpoint {
            position: player.position,
            traveled_distance: player.traveled_distance,
            gamemode: handler.current(),
            upside_down: player.upside_down,
            is_small: player.is_small,
            cam_state: camera.save(),
            activated_ids: ids.snapshot(),
        };
        info!(distance = checkpoint.traveled_distance, "checkpoint placed");
        practice.checkpoints.push(checkpoint);
    }
    if input.remove_checkpoint {
        practice.remove_latest();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::system::RunSystemOnce;
    use glam::Vec3;
    use pulse_sim::create_world;

    fn test_world() -> World {
        let mut world = create_world();
        world.init_resource::<ObjectIdHandler>();
        world.insert_resource(GamemodeHandler::default());
        world.insert_resource(CameraBehaviour::default());
        world.resource_mut::<PracticeState>().enabled = true;
        world
    }

    #[test]
    fn test_place_captures_everything_from_the_same_frame() {
        let mut world = test_world();
        {
            let mut ids = world.resource_mut::<ObjectIdHandler>();
            let id = ids.assign();
            ids.activate(id);
        }
        {
            let mut player = world.resource_mut::<PlayerState>();
            player.position = Vec3::new(25.0, 3.0, 0.0);
            player.traveled_distance = 25.0;
            player.upside_down = true;
        }
        world.resource_mut::<InputSnapshot>().place_checkpoint = true;
        world.run_system_once(practice_system).unwrap();

        let practice = world.resource::<PracticeState>();
        let checkpoint = practice.latest().unwrap();
        assert_eq!(checkpoint.traveled_distance, 25.0);
        assert!(checkpoint.upside_down);
        assert_eq!(checkpoint.activated_ids, vec![0]);
    }

    #[test]
    fn test_save_then_restore_is_identity() {
        // Placing a checkpoint and dying on the same spot must hand back
        // exactly the captured state.
        let mut world = test_world();
        world.insert_resource(pulse_level::LevelRes {
            name: "test".into(),
            path: pulse_math::LevelPath::straight(100.0),
        });
        {
            let mut player = world.resource_mut::<PlayerState>();
            player.position = Vec3::new(40.0, 5.0, 0.0);
            player.traveled_distance = 40.0;
            player.is_small = true;
        }
        world.resource_mut::<InputSnapshot>().place_checkpoint = true;
        world.run_system_once(practice_system).unwrap();
        let placed = world.resource::<PracticeState>().latest().unwrap().clone();

        world.resource_mut::<PlayerState>().traveled_distance = 55.0;
        world.send_event(DeathEvent);
        world.run_system_once(crate::spawn::death_system).unwrap();

        let player = world.resource::<PlayerState>();
        assert_eq!(player.position, placed.position);
        assert_eq!(player.traveled_distance, placed.traveled_distance);
        assert_eq!(player.is_small, placed.is_small);
    }

    #[test]
    fn test_leaving_practice_clears_checkpoints_and_restarts() {
        let mut world = test_world();
        world.resource_mut::<PracticeState>().checkpoints.push(Checkpoint {
            position: Vec3::ZERO,
            traveled_distance: 10.0,
            gamemode: pulse_sim::Gamemode::Cube,
            upside_down: false,
            is_small: false,
            cam_state: pulse_sim::CamState::default(),
            activated_ids: vec![],
        });
        world.resource_mut::<InputSnapshot>().toggle_practice = true;
        world.run_system_once(practice_system).unwrap();

        let practice = world.resource::<PracticeState>();
        assert!(!practice.enabled);
        assert!(practice.checkpoints.is_empty());
        let events = world.resource::<bevy_ecs::event::Events<DeathEvent>>();
        assert_eq!(events.get_cursor().read(events).count(), 1);
    }

    #[test]
    fn test_remove_pops_the_latest_checkpoint() {
        let mut world = test_world();
        for distance in [10.0, 20.0] {
            world.resource_mut::<PlayerState>().traveled_distance = distance;
            world.resource_mut::<InputSnapshot>().place_checkpoint = true;
            world.run_system_once(practice_system).unwrap();
        }
        world.resource_mut::<InputSnapshot>().place_checkpoint = false;
        world.resource_mut::<InputSnapshot>().remove_checkpoint = true;
        world.run_system_once(practice_system).unwrap();

        let practice = world.resource::<PracticeState>();
        assert_eq!(practice.checkpoints.len(), 1);
        assert_eq!(practice.latest().unwrap().traveled_distance, 10.0);
    }
}
