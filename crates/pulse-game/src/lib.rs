//! Wiring for the Pulse runner: builds the world, registers every gameplay
//! system in its stage, and resolves bindings into the per-frame input
//! snapshot. The binary and the integration tests share this setup.

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_camera::{CameraBehaviour, CameraTuning, EaseManager, ShakeRng};
use pulse_config::Config;
use pulse_input::{BindingSet, GamepadState, KeyboardState, PressMode};
use pulse_level::{LevelDefinition, LevelProgress, ObjectIdHandler};
use pulse_player::{GamemodeHandler, PlayerTuning};
use pulse_sim::{Gamemode, InputSnapshot, SimSchedules, SimStage, create_world};

fn player_tuning(config: &Config) -> PlayerTuning {
    PlayerTuning {
        normal_speed: config.player.normal_speed,
        cube_gravity: config.player.cube_gravity,
        cube_jump_velocity: config.player.cube_jump_velocity,
        ship_accel: config.player.ship_accel,
        ship_gravity: config.player.ship_gravity,
        max_fall_speed: config.player.max_fall_speed,
        small_multiplier: config.player.small_multiplier,
    }
}

fn camera_tuning(config: &Config) -> CameraTuning {
    CameraTuning {
        offset: Vec3::from_array(config.camera.offset),
        extra_start_offset: Vec3::from_array(config.camera.extra_start_offset),
        rotation: Vec3::from_array(config.camera.rotation),
        fov: config.camera.fov,
        limit_y_min: config.camera.limit_y_min,
        limit_y_max: config.camera.limit_y_max,
        y_max_delta: config.camera.y_max_delta,
        y_lerp_delta: config.camera.y_lerp_delta,
    }
}

/// Build a world with the level spawned and every gameplay resource in
/// place.
#[must_use]
pub fn build_world(config: &Config, level: &LevelDefinition) -> World {
    let mut world = create_world();
    world.init_resource::<ObjectIdHandler>();
    world.init_resource::<LevelProgress>();
    world.init_resource::<EaseManager>();
    world.init_resource::<ShakeRng>();
    world.insert_resource(player_tuning(config));
    world.insert_resource(GamemodeHandler::new(Gamemode::Cube));

    level.spawn_into(&mut world);
    let start = level.path().start_position();
    world.resource_mut::<pulse_sim::PlayerState>().position = start;
    world.insert_resource(CameraBehaviour::new(camera_tuning(config), start));
    world.resource_mut::<pulse_sim::PracticeState>().enabled =
        config.practice.start_in_practice;
    world
}

/// Build the schedules with every gameplay system in its stage.
///
/// Update runs as one chain: respawn handling first (against the state the
/// death pass restored), then level objects, then the gamemode handler, then
/// camera commands, so an effect fired this frame is visible to its consumer
/// this frame.
#[must_use]
pub fn build_schedules() -> SimSchedules {
    let mut schedules = SimSchedules::new();
    schedules.add_systems(
        SimStage::FixedUpdate,
        (
            pulse_player::movement_system,
            pulse_player::physics_system,
            pulse_level::touch_trigger_system,
            pulse_camera::camera_y_system,
        )
            .chain(),
    );
    schedules.add_systems(
        SimStage::Update,
        (
            pulse_player::practice_system,
            pulse_level::record_progress_system,
            pulse_player::death_system,
            pulse_level::trigger_respawn_system,
            pulse_level::portal_respawn_system,
            pulse_player::gamemode_respawn_system,
            pulse_camera::camera_respawn_system,
            pulse_level::portal_system,
            pulse_level::pass_trigger_system,
            pulse_player::gamemode_request_system,
            pulse_player::gamemode_update_system,
            pulse_camera::shake_command_system,
            pulse_camera::ease_command_system,
            pulse_camera::shake_update_system,
            pulse_camera::ease_update_system,
            pulse_player::win_system,
        )
            .chain(),
    );
    schedules.add_systems(SimStage::PostUpdate, pulse_camera::camera_late_system);
    schedules
}

/// Resolve the bound actions into the flat snapshot the simulation reads.
#[must_use]
pub fn resolve_input(
    bindings: &BindingSet,
    keyboard: &KeyboardState,
    gamepad: &GamepadState,
) -> InputSnapshot {
    InputSnapshot {
        click_held: bindings.pressed("click", keyboard, gamepad, PressMode::Hold),
        click_down: bindings.pressed("click", keyboard, gamepad, PressMode::Down),
        click_up: bindings.pressed("click", keyboard, gamepad, PressMode::Up),
        place_checkpoint: bindings.pressed("place_checkpoint", keyboard, gamepad, PressMode::Down),
        remove_checkpoint: bindings.pressed(
            "remove_checkpoint",
            keyboard,
            gamepad,
            PressMode::Down,
        ),
        toggle_practice: bindings.pressed("toggle_practice", keyboard, gamepad, PressMode::Down),
    }
}
