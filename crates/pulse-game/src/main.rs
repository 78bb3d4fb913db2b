//! Pulse - a path-runner simulation in the spirit of rhythm platformers.
//!
//! Loads a level (RON file or the built-in demo), wires the simulation
//! schedules, and runs attempts headless at a fixed 60 Hz until the level
//! is completed. Input comes from a connected gamepad when one is present;
//! best percents persist to the save file on exit.
//!
//! Run with: `cargo run -p pulse-game -- --level my_level.ron`

use std::time::{Duration, Instant};

use clap::Parser;
use pulse_config::{CliArgs, Config};
use pulse_game::{build_schedules, build_world, resolve_input};
use pulse_input::{BindingSet, GamepadManager, KeyboardState};
use pulse_level::{LevelDefinition, LevelProgress, LevelRes, SaveFile, default_save_path};
use pulse_sim::{InputSnapshot, PlayerState};
use tracing::{error, info, warn};

fn load_level(args: &CliArgs) -> LevelDefinition {
    match &args.level {
        Some(path) => match LevelDefinition::load(path) {
            Ok(level) => level,
            Err(err) => {
                warn!("could not load level, falling back to demo: {err}");
                LevelDefinition::demo()
            }
        },
        None => LevelDefinition::demo(),
    }
}

fn main() {
    let args = CliArgs::parse();
    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(Config::default_config_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error, using defaults: {err}");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    pulse_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let level = load_level(&args);
    info!(level = %level.name, "starting");

    let mut world = build_world(&config, &level);
    let mut schedules = build_schedules();

    let mut bindings = BindingSet::runner_defaults();
    bindings.apply_overrides(
        config
            .input
            .keybindings
            .iter()
            .map(|(name, key)| (name.as_str(), key.as_str())),
    );
    let keyboard = KeyboardState::new();
    let mut gamepads = GamepadManager::new();
    gamepads.set_deadzone(config.input.gamepad_deadzone);

    let mut previous = Instant::now();
    loop {
        let now = Instant::now();
        let dt = now.duration_since(previous).as_secs_f64();
        previous = now;

        gamepads.poll();
        *world.resource_mut::<InputSnapshot>() =
            resolve_input(&bindings, &keyboard, gamepads.state());

        schedules.run(&mut world, dt);
        gamepads.clear_transients();

        if world.resource::<PlayerState>().won {
            break;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    // One more frame so the win lands in the progress record.
    schedules.run(&mut world, schedules.fixed_dt());

    let progress = *world.resource::<LevelProgress>();
    let level_name = world.resource::<LevelRes>().name.clone();
    info!(
        best = progress.normal_percent * 100.0,
        practice = progress.practice_percent * 100.0,
        "run finished"
    );

    if progress.dirty {
        if let Some(path) = default_save_path() {
            let mut save = SaveFile::load_or_default(&path);
            save.record(&level_name, &progress);
            if let Err(err) = save.save(&path) {
                error!("could not write save file: {err}");
            }
        }
    }
}
