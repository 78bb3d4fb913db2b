//! Configuration for the Pulse runner: layered config structs with RON
//! persistence and command-line overrides.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InputConfig, PlayerConfig, PracticeConfig, WindowConfig,
};
pub use error::ConfigError;
