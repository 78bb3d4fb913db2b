//! Fixed-tick movement: constant forward speed along the path, with the
//! vertical axis owned by the active gamemode's physics.

use bevy_ecs::prelude::*;
use pulse_level::LevelRes;
use pulse_sim::{BorderState, Gamemode, InputSnapshot, PlayerState, TimeRes, WinEvent};
use tracing::info;

use crate::gamemode::GamemodeHandler;

/// Movement tuning, filled in from the config file.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Forward speed along the path, units per second.
    pub normal_speed: f32,
    /// Cube gravity, units per second squared.
    pub cube_gravity: f32,
    /// Vertical velocity a cube jump imparts.
    pub cube_jump_velocity: f32,
    /// Ship climb acceleration while the click is held.
    pub ship_accel: f32,
    /// Ship sink acceleration while the click is released.
    pub ship_gravity: f32,
    /// Terminal vertical speed, both directions.
    pub max_fall_speed: f32,
    /// Jump scale while the player is small.
    pub small_multiplier: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            normal_speed: 10.386,
            cube_gravity: 85.0,
            cube_jump_velocity: 20.0,
            ship_accel: 35.0,
            ship_gravity: 30.0,
            max_fall_speed: 28.0,
            small_multiplier: 0.8,
        }
    }
}

/// Ceiling a gravity-flipped cube rests against when no borders cap the
/// playfield.
const DEFAULT_CEILING: f32 = BorderState::MAX_HEIGHT;

/// Advances the player along the path one fixed tick. X and Z come from the
/// path; Y stays whatever the physics pass left there.
pub fn movement_system(
    time: Res<TimeRes>,
    tuning: Res<PlayerTuning>,
    level: Res<LevelRes>,
    mut player: ResMut<PlayerState>,
) {
    if player.dead || player.won {
        return;
    }
    player.traveled_distance += tuning.normal_speed * time.fixed_delta;
    let on_path = level.path.position_at(player.traveled_distance);
    player.position.x = on_path.x;
    player.position.z = on_path.z;
}

/// Vertical physics for the active gamemode, one fixed tick. No-op while
/// dead; `Gamemode::None` leaves the player where it is.
pub fn physics_system(
    time: Res<TimeRes>,
    tuning: Res<PlayerTuning>,
    input: Res<InputSnapshot>,
    borders: Res<BorderState>,
    mut handler: ResMut<GamemodeHandler>,
    mut player: ResMut<PlayerState>,
) {
    if player.dead {
        return;
    }
    let dt = time.fixed_delta;
    let gravity_dir = player.gravity_multiplier();
    let (floor, ceiling) = if borders.active {
        (borders.min_y, borders.max_y)
    } else {
        (0.0, DEFAULT_CEILING)
    };

    match handler.current() {
        Gamemode::None => {}
        Gamemode::Cube => {
            player.velocity_y -= tuning.cube_gravity * gravity_dir * dt;
            player.velocity_y = player
                .velocity_y
                .clamp(-tuning.max_fall_speed, tuning.max_fall_speed);
            player.position.y += player.velocity_y * dt;

            // Land on the floor, or on the ceiling while flipped.
            handler.cube.grounded = false;
            if gravity_dir > 0.0 && player.position.y <= floor {
                player.position.y = floor;
                player.velocity_y = 0.0;
                handler.cube.grounded = true;
            } else if gravity_dir < 0.0 && player.position.y >= ceiling {
                player.position.y = ceiling;
                player.velocity_y = 0.0;
                handler.cube.grounded = true;
            }

            if handler.cube.grounded && input.click_held {
                let jump = if player.is_small {
                    tuning.cube_jump_velocity * tuning.small_multiplier
                } else {
                    tuning.cube_jump_velocity
                };
                player.velocity_y = jump * gravity_dir;
                handler.cube.grounded = false;
            }
        }
        Gamemode::Ship => {
            let accel = if input.click_held {
                tuning.ship_accel
            } else {
                -tuning.ship_gravity
            };
            player.velocity_y += accel * gravity_dir * dt;
            player.velocity_y = player
                .velocity_y
                .clamp(-tuning.max_fall_speed, tuning.max_fall_speed);
            player.position.y += player.velocity_y * dt;

            // Ships slide along the playfield edges instead of bouncing.
            if player.position.y <= floor {
                player.position.y = floor;
                player.velocity_y = player.velocity_y.max(0.0);
            } else if player.position.y >= ceiling {
                player.position.y = ceiling;
                player.velocity_y = player.velocity_y.min(0.0);
            }
        }
    }
}

/// Emits [`WinEvent`] once when the traveled distance reaches the path end.
pub fn win_system(
    level: Res<LevelRes>,
    mut player: ResMut<PlayerState>,
    mut wins: EventWriter<WinEvent>,
) {
    if player.dead || player.won {
        return;
    }
    if player.traveled_distance >= level.path.length() {
        player.won = true;
        info!("level complete");
        wins.send(WinEvent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::event::Events;
    use bevy_ecs::system::RunSystemOnce;
    use glam::Vec3;
    use pulse_math::LevelPath;
    use pulse_sim::create_world;

    fn test_world() -> World {
        let mut world = create_world();
        world.init_resource::<PlayerTuning>();
        world.insert_resource(GamemodeHandler::default());
        world.insert_resource(LevelRes {
            name: "test".into(),
            path: LevelPath::straight(100.0),
        });
        world.resource_mut::<TimeRes>().fixed_delta = 1.0 / 60.0;
        world
    }

    fn fixed_tick(world: &mut World) {
        world.run_system_once(movement_system).unwrap();
        world.run_system_once(physics_system).unwrap();
    }

    #[test]
    fn test_forward_speed_is_constant() {
        let mut world = test_world();
        for _ in 0..60 {
            fixed_tick(&mut world);
        }
        let player = world.resource::<PlayerState>();
        assert!((player.traveled_distance - 10.386).abs() < 1e-3);
        assert!((player.position.x - 10.386).abs() < 1e-3);
    }

    #[test]
    fn test_dead_player_does_not_move() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().dead = true;
        fixed_tick(&mut world);
        assert_eq!(world.resource::<PlayerState>().traveled_distance, 0.0);
    }

    #[test]
    fn test_grounded_cube_jumps_while_held() {
        let mut world = test_world();
        world.resource_mut::<InputSnapshot>().click_held = true;
        fixed_tick(&mut world);
        let player = world.resource::<PlayerState>();
        assert!(player.velocity_y > 0.0);
        let tuning = world.resource::<PlayerTuning>();
        assert_eq!(player.velocity_y, tuning.cube_jump_velocity);
    }

    #[test]
    fn test_small_cube_jumps_lower() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().is_small = true;
        world.resource_mut::<InputSnapshot>().click_held = true;
        fixed_tick(&mut world);
        let player = world.resource::<PlayerState>();
        let tuning = world.resource::<PlayerTuning>();
        assert_eq!(
            player.velocity_y,
            tuning.cube_jump_velocity * tuning.small_multiplier
        );
    }

    #[test]
    fn test_flipped_cube_rests_on_the_ceiling() {
        let mut world = test_world();
        {
            let mut player = world.resource_mut::<PlayerState>();
            player.upside_down = true;
            player.position = Vec3::new(0.0, 30.0, 0.0);
        }
        world.resource_mut::<BorderState>().apply(0.0, 40.0);
        for _ in 0..300 {
            fixed_tick(&mut world);
        }
        let player = world.resource::<PlayerState>();
        assert_eq!(player.position.y, 40.0);
        assert!(world.resource::<GamemodeHandler>().cube.grounded);
    }

    #[test]
    fn test_ship_climbs_while_held_and_sinks_released() {
        let mut world = test_world();
        world.send_event(pulse_sim::GamemodeRequest(Gamemode::Ship));
        world
            .run_system_once(crate::gamemode::gamemode_request_system)
            .unwrap();
        world.resource_mut::<PlayerState>().position.y = 10.0;

        world.resource_mut::<InputSnapshot>().click_held = true;
        for _ in 0..30 {
            fixed_tick(&mut world);
        }
        let mid_y = world.resource::<PlayerState>().position.y;
        assert!(mid_y > 10.0);

        world.resource_mut::<InputSnapshot>().click_held = false;
        for _ in 0..120 {
            fixed_tick(&mut world);
        }
        assert!(world.resource::<PlayerState>().position.y < mid_y);
    }

    #[test]
    fn test_win_fires_once_at_path_end() {
        let mut world = test_world();
        world.resource_mut::<PlayerState>().traveled_distance = 100.0;
        world.run_system_once(win_system).unwrap();
        world.run_system_once(win_system).unwrap();
        assert!(world.resource::<PlayerState>().won);
        let events = world.resource::<Events<WinEvent>>();
        assert_eq!(events.get_cursor().read(events).count(), 1);
    }
}
