//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level runner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings (used when a windowed host drives the loop).
    pub window: WindowConfig,
    /// Player movement tuning.
    pub player: PlayerConfig,
    /// Camera follow and easing tuning.
    pub camera: CameraConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Practice-mode settings.
    pub practice: PracticeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Enable vsync.
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Player movement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Forward speed along the path in units per second.
    pub normal_speed: f32,
    /// Downward acceleration for the cube gamemode, units per second squared.
    pub cube_gravity: f32,
    /// Upward velocity applied on a cube jump, units per second.
    pub cube_jump_velocity: f32,
    /// Vertical acceleration while the click is held in the ship gamemode.
    pub ship_accel: f32,
    /// Ship gravity while the click is released.
    pub ship_gravity: f32,
    /// Terminal vertical speed magnitude for both gamemodes.
    pub max_fall_speed: f32,
    /// Velocity multiplier applied while the player is small.
    pub small_multiplier: f32,
}

/// Camera follow configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera offset from the follow target, `[x, y, z]`.
    pub offset: [f32; 3],
    /// Extra offset added only to the starting position.
    pub extra_start_offset: [f32; 3],
    /// Camera rotation in euler degrees, `[x, y, z]`.
    pub rotation: [f32; 3],
    /// Lower Y follow limit relative to the camera position.
    pub limit_y_min: f32,
    /// Upper Y follow limit relative to the camera position.
    pub limit_y_max: f32,
    /// Maximum vertical target step per fixed tick.
    pub y_max_delta: f32,
    /// Vertical lerp blend factor per fixed tick.
    pub y_lerp_delta: f32,
    /// Starting vertical field of view in degrees.
    pub fov: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Gamepad stick deadzone.
    pub gamepad_deadzone: f32,
    /// Keybinding overrides (binding name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Practice-mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PracticeConfig {
    /// Start the level in practice mode.
    pub start_in_practice: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log trigger activations at debug level.
    pub log_triggers: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "Pulse".to_string(),
        }
    }
}

impl Default for PlayerConfig {
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

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [6.0, 3.5, -10.0],
            extra_start_offset: [0.0, -1.0, 0.0],
            rotation: [15.0, 0.0, 0.0],
            limit_y_min: -2.0,
            limit_y_max: 2.0,
            y_max_delta: 0.2,
            y_lerp_delta: 0.3,
            fov: 60.0,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            gamepad_deadzone: 0.15,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            start_in_practice: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_triggers: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
        let new_config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Default config directory under the platform's config root.
    #[must_use]
    pub fn default_config_dir() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("pulse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("normal_speed: 10.386"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        // Config missing the `camera` section entirely
        let ron_str = "(window: (), player: (), input: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.player.normal_speed = 12.0;
        config.practice.start_in_practice = true;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_malformed_config_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(window: garbage").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        match &err {
            ConfigError::Parse { path, .. } => assert!(path.ends_with("config.ron")),
            other => panic!("expected a parse error, got {other}"),
        }
        assert_eq!(err.path(), Some(dir.path().join("config.ron").as_path()));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.camera.fov = 90.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result, Some(modified));
    }

    #[test]
    fn test_reload_no_changes_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert_eq!(config.reload(dir.path()).unwrap(), None);
    }
}
