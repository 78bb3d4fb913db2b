//! Command-line argument parsing for the Pulse runner.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Pulse command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "pulse", about = "Pulse runner")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Start the level in practice mode.
    #[arg(long)]
    pub practice: Option<bool>,

    /// Forward speed override in units per second.
    #[arg(long)]
    pub speed: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to a level file (RON). Defaults to the built-in demo level.
    #[arg(long)]
    pub level: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(practice) = args.practice {
            self.practice.start_in_practice = practice;
        }
        if let Some(speed) = args.speed {
            self.player.normal_speed = speed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
