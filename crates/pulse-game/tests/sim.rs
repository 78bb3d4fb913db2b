//! End-to-end simulation tests driving the full schedule set, frame by
//! frame, the way the runner does.

use bevy_ecs::event::Events;
use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_camera::{CameraBehaviour, MAX_FOV};
use pulse_config::Config;
use pulse_game::{build_schedules, build_world};
use pulse_level::{
    LevelDefinition, LevelProgress, PortalDef, Trigger, TriggerDef, TriggerEffect,
};
use pulse_math::{EaseCurve, EaseSettings};
use pulse_player::GamemodeHandler;
use pulse_sim::{
    DeathEvent, Gamemode, GravityChanged, InputSnapshot, PlayerState, PracticeState, SimSchedules,
};

const DT: f64 = 1.0 / 60.0;

fn trigger_at(distance: f32, effect: TriggerEffect) -> TriggerDef {
    TriggerDef {
        distance,
        touch_triggered: false,
        touch_radius: 1.0,
        position: [distance, 0.0, 0.0],
        effect,
    }
}

fn flat_level(triggers: Vec<TriggerDef>, portals: Vec<PortalDef>) -> LevelDefinition {
    LevelDefinition {
        name: "test".into(),
        waypoints: vec![[0.0, 0.0, 0.0], [500.0, 0.0, 0.0]],
        triggers,
        portals,
    }
}

fn setup(level: LevelDefinition) -> (World, SimSchedules) {
    let world = build_world(&Config::default(), &level);
    (world, build_schedules())
}

fn run_frames(world: &mut World, schedules: &mut SimSchedules, frames: usize) {
    for _ in 0..frames {
        schedules.run(world, DT);
    }
}

fn fired_count(world: &mut World) -> usize {
    world
        .query::<&Trigger>()
        .iter(world)
        .filter(|t| t.activated)
        .count()
}

#[test]
fn trigger_fires_exactly_once_between_respawns() {
    let level = flat_level(
        vec![trigger_at(
            5.0,
            TriggerEffect::Shake {
                strength: 1.0,
                frequency: 10.0,
                length: 0.5,
            },
        )],
        vec![],
    );
    let (mut world, mut schedules) = setup(level);

    run_frames(&mut world, &mut schedules, 120);
    assert_eq!(fired_count(&mut world), 1);

    // Many more frames past the trigger: still exactly one activation, and
    // no second shake starts once the first decays.
    run_frames(&mut world, &mut schedules, 120);
    assert_eq!(fired_count(&mut world), 1);
    let camera = world.resource::<CameraBehaviour>();
    assert_eq!(camera.shake_offset, Vec3::ZERO);
}

#[test]
fn crossing_a_trigger_in_one_tick_fires_it_once() {
    // Distance 9.9 -> 10.2 across one tick with the trigger at 10.0.
    let level = flat_level(
        vec![trigger_at(
            10.0,
            TriggerEffect::FlipGravity { upside_down: true },
        )],
        vec![],
    );
    let (mut world, mut schedules) = setup(level);
    world.resource_mut::<PlayerState>().traveled_distance = 9.9;

    // Forward speed 10.386 covers ~0.173 units per tick: one frame lands
    // past 10.0.
    schedules.run(&mut world, DT);
    assert_eq!(fired_count(&mut world), 1);
    assert!(world.resource::<PlayerState>().upside_down);

    schedules.run(&mut world, DT);
    assert_eq!(fired_count(&mut world), 1);

    // The gravity edge was announced exactly once.
    let events = world.resource::<Events<GravityChanged>>();
    assert!(events.get_cursor().read(events).count() <= 1);
}

#[test]
fn non_practice_respawn_resets_to_level_start() {
    let level = flat_level(
        vec![trigger_at(
            3.0,
            TriggerEffect::FlipGravity { upside_down: true },
        )],
        vec![PortalDef {
            distance: 6.0,
            position: [6.0, 5.0, 0.0],
            target: Gamemode::Ship,
            border_distance: Some(10.0),
            set_small: Some(true),
        }],
    );
    let (mut world, mut schedules) = setup(level);

    run_frames(&mut world, &mut schedules, 120);
    {
        let player = world.resource::<PlayerState>();
        assert!(player.upside_down);
        assert!(player.is_small);
    }
    assert_eq!(
        world.resource::<GamemodeHandler>().current(),
        Gamemode::Ship
    );

    world.send_event(DeathEvent);
    run_frames(&mut world, &mut schedules, 2);

    let player = world.resource::<PlayerState>();
    assert!(!player.dead);
    assert_eq!(player.traveled_distance, 0.0);
    assert!(!player.upside_down);
    assert!(!player.is_small);
    assert_eq!(
        world.resource::<GamemodeHandler>().current(),
        Gamemode::Cube
    );
    // Cleared activation table: the trigger may fire again on the next run.
    run_frames(&mut world, &mut schedules, 120);
    assert!(world.resource::<PlayerState>().upside_down);
}

#[test]
fn practice_respawn_restores_the_checkpoint_exactly() {
    let level = flat_level(vec![], vec![]);
    let (mut world, mut schedules) = setup(level);
    world.resource_mut::<PracticeState>().enabled = true;

    run_frames(&mut world, &mut schedules, 60);
    world.resource_mut::<InputSnapshot>().place_checkpoint = true;
    schedules.run(&mut world, DT);
    world.resource_mut::<InputSnapshot>().place_checkpoint = false;

    let placed = world
        .resource::<PracticeState>()
        .latest()
        .expect("checkpoint placed")
        .clone();

    run_frames(&mut world, &mut schedules, 60);
    world.send_event(DeathEvent);
    schedules.run(&mut world, DT);

    let player = world.resource::<PlayerState>();
    assert_eq!(player.traveled_distance, placed.traveled_distance);
    assert_eq!(player.position, placed.position);
    // The exact save/restore identity is covered at the camera unit level;
    // through the full frame the follow pass re-syncs X/Z to the restored
    // player, so compare the fields the follow pass does not own.
    let camera = world.resource::<CameraBehaviour>();
    assert_eq!(camera.offset, placed.cam_state.offset);
    assert_eq!(camera.rotation, placed.cam_state.rotation);
    assert_eq!(camera.fov, placed.cam_state.fov);
    assert_eq!(
        world.resource::<GamemodeHandler>().current(),
        placed.gamemode
    );
}

#[test]
fn fov_ease_targets_clamp_to_the_legal_range() {
    let level = flat_level(
        vec![trigger_at(
            2.0,
            TriggerEffect::EaseFov {
                target: 10_000.0,
                settings: EaseSettings::new(0.5, EaseCurve::Linear),
            },
        )],
        vec![],
    );
    let (mut world, mut schedules) = setup(level);

    run_frames(&mut world, &mut schedules, 300);
    let camera = world.resource::<CameraBehaviour>();
    assert_eq!(camera.fov, MAX_FOV);
    assert!(camera.fov_ease.is_none());
}

#[test]
fn second_ease_on_a_channel_wins() {
    let level = flat_level(
        vec![
            trigger_at(
                2.0,
                TriggerEffect::EaseOffset {
                    target: [100.0, 0.0, 0.0],
                    settings: EaseSettings::new(10.0, EaseCurve::Linear),
                },
            ),
            trigger_at(
                4.0,
                TriggerEffect::EaseOffset {
                    target: [0.0, 50.0, 0.0],
                    settings: EaseSettings::new(0.5, EaseCurve::Linear),
                },
            ),
        ],
        vec![],
    );
    let (mut world, mut schedules) = setup(level);

    run_frames(&mut world, &mut schedules, 300);
    let camera = world.resource::<CameraBehaviour>();
    assert_eq!(camera.offset, Vec3::new(0.0, 50.0, 0.0));
    assert!(camera.offset_ease.is_none());
}

#[test]
fn shake_is_zero_after_its_duration() {
    let level = flat_level(
        vec![trigger_at(
            1.0,
            TriggerEffect::Shake {
                strength: 1.0,
                frequency: 5.0,
                length: 2.0,
            },
        )],
        vec![],
    );
    let (mut world, mut schedules) = setup(level);

    // Reach the trigger, then let the full 2 s run out.
    run_frames(&mut world, &mut schedules, 10);
    run_frames(&mut world, &mut schedules, 130);
    let camera = world.resource::<CameraBehaviour>();
    assert_eq!(camera.shake_offset, Vec3::ZERO);
    assert_eq!(camera.shake_length_timer, 0.0);

    run_frames(&mut world, &mut schedules, 30);
    let camera = world.resource::<CameraBehaviour>();
    assert_eq!(camera.shake_offset, Vec3::ZERO);
}

#[test]
fn full_run_wins_and_records_the_percent() {
    let level = flat_level(vec![], vec![]);
    let (mut world, mut schedules) = setup(level);

    // 500 units at 10.386 u/s is just under 49 s of simulation.
    run_frames(&mut world, &mut schedules, 49 * 60);
    assert!(world.resource::<PlayerState>().won);
    run_frames(&mut world, &mut schedules, 2);
    assert_eq!(world.resource::<LevelProgress>().normal_percent, 1.0);
}
