//! Level definitions: the RON file format, the loader, and spawning a
//! definition into a world.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use glam::Vec3;
use pulse_math::LevelPath;
use pulse_sim::Gamemode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::id::ObjectIdHandler;
use crate::portal::Portal;
use crate::trigger::{Trigger, TriggerEffect};

/// Errors from loading or parsing a level file.
#[derive(Error, Debug)]
pub enum LevelError {
    /// Could not read the level file.
    #[error("failed to read level file {path}: {source}")]
    ReadError {
        /// The file that failed.
        path: PathBuf,
        /// The underlying io error.
        source: std::io::Error,
    },
    /// The file is not valid RON.
    #[error("failed to parse level file: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// A level needs at least two waypoints to form a path.
    #[error("level '{0}' has fewer than two waypoints")]
    DegeneratePath(String),
}

fn default_touch_radius() -> f32 {
    1.0
}

/// A trigger as written in a level file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerDef {
    /// Path distance at which a pass trigger arms.
    pub distance: f32,
    /// Fire on proximity instead of distance.
    #[serde(default)]
    pub touch_triggered: bool,
    /// Proximity radius for touch triggers.
    #[serde(default = "default_touch_radius")]
    pub touch_radius: f32,
    /// World position.
    #[serde(default)]
    pub position: [f32; 3],
    /// The effect to fire.
    pub effect: TriggerEffect,
}

/// A portal as written in a level file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalDef {
    /// Path distance at which the portal takes effect.
    pub distance: f32,
    /// World position, the vertical centre for border placement.
    pub position: [f32; 3],
    /// The mode to switch to.
    pub target: Gamemode,
    /// Border height to apply, or none to remove borders.
    #[serde(default)]
    pub border_distance: Option<f32>,
    /// Size flag to apply on entry.
    #[serde(default)]
    pub set_small: Option<bool>,
}

/// A complete level as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Display name, also the save-file key.
    pub name: String,
    /// Path waypoints in order.
    pub waypoints: Vec<[f32; 3]>,
    /// Triggers along the path.
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
    /// Portals along the path.
    #[serde(default)]
    pub portals: Vec<PortalDef>,
}

impl LevelDefinition {
    /// Load a level from a RON file.
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LevelError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&contents)
    }

    /// Parse a level from RON text.
    pub fn from_ron(contents: &str) -> Result<Self, LevelError> {
        let level: Self = ron::from_str(contents)?;
        if level.waypoints.len() < 2 {
            return Err(LevelError::DegeneratePath(level.name));
        }
        Ok(level)
    }

    /// Build the path this level's waypoints describe.
    #[must_use]
    pub fn path(&self) -> LevelPath {
        let points: Vec<Vec3> = self.waypoints.iter().copied().map(Vec3::from_array).collect();
        LevelPath::new(&points)
    }

    /// Spawn the level into a world: assigns ids, spawns trigger and portal
    /// entities, and inserts the [`LevelRes`] resource.
    pub fn spawn_into(&self, world: &mut World) {
        let path = self.path();
        info!(
            name = %self.name,
            length = path.length(),
            triggers = self.triggers.len(),
            portals = self.portals.len(),
            "spawning level"
        );
        for def in &self.triggers {
            let id = world.resource_mut::<ObjectIdHandler>().assign();
            world.spawn(Trigger {
                id,
                distance: def.distance,
                touch_triggered: def.touch_triggered,
                touch_radius: def.touch_radius,
                position: Vec3::from_array(def.position),
                activated: false,
                player_has_passed: false,
                effect: def.effect,
            });
        }
        for def in &self.portals {
            let id = world.resource_mut::<ObjectIdHandler>().assign();
            world.spawn(Portal {
                id,
                distance: def.distance,
                position: Vec3::from_array(def.position),
                target: def.target,
                border_distance: def.border_distance,
                set_small: def.set_small,
                entered: false,
            });
        }
        world.insert_resource(LevelRes {
            name: self.name.clone(),
            path,
        });
    }

    /// A small built-in level used when no level file is given.
    #[must_use]
    pub fn demo() -> Self {
        use pulse_math::{EaseCurve, EaseSettings};
        Self {
            name: "demo".into(),
            waypoints: vec![[0.0, 0.0, 0.0], [200.0, 0.0, 0.0]],
            triggers: vec![
                TriggerDef {
                    distance: 30.0,
                    touch_triggered: false,
                    touch_radius: 1.0,
                    position: [30.0, 0.0, 0.0],
                    effect: TriggerEffect::Shake {
                        strength: 0.4,
                        frequency: 20.0,
                        length: 0.8,
                    },
                },
                TriggerDef {
                    distance: 60.0,
                    touch_triggered: false,
                    touch_radius: 1.0,
                    position: [60.0, 0.0, 0.0],
                    effect: TriggerEffect::EaseFov {
                        target: 75.0,
                        settings: EaseSettings {
                            duration: 1.5,
                            curve: EaseCurve::EaseInOut,
                        },
                    },
                },
                TriggerDef {
                    distance: 120.0,
                    touch_triggered: false,
                    touch_radius: 1.0,
                    position: [120.0, 0.0, 0.0],
                    effect: TriggerEffect::FlipGravity { upside_down: true },
                },
            ],
            portals: vec![
                PortalDef {
                    distance: 90.0,
                    position: [90.0, 5.0, 0.0],
                    target: Gamemode::Ship,
                    border_distance: Some(10.0),
                    set_small: None,
                },
                PortalDef {
                    distance: 160.0,
                    position: [160.0, 0.0, 0.0],
                    target: Gamemode::Cube,
                    border_distance: None,
                    set_small: None,
                },
            ],
        }
    }
}

/// The loaded level: its name and the path the player travels.
#[derive(Resource, Debug, Clone)]
pub struct LevelRes {
    /// Display name, also the save-file key.
    pub name: String,
    /// The level path.
    pub path: LevelPath,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectIdHandler;

    #[test]
    fn test_demo_level_roundtrips_through_ron() {
        let demo = LevelDefinition::demo();
        let text = ron::ser::to_string(&demo).unwrap();
        let parsed = LevelDefinition::from_ron(&text).unwrap();
        assert_eq!(parsed.name, demo.name);
        assert_eq!(parsed.triggers.len(), demo.triggers.len());
        assert_eq!(parsed.portals.len(), demo.portals.len());
    }

    #[test]
    fn test_degenerate_path_is_rejected() {
        let text = r#"(name: "flat", waypoints: [(0.0, 0.0, 0.0)])"#;
        assert!(matches!(
            LevelDefinition::from_ron(text),
            Err(LevelError::DegeneratePath(_))
        ));
    }

    #[test]
    fn test_spawn_into_assigns_unique_ids() {
        let mut world = World::new();
        world.init_resource::<ObjectIdHandler>();
        LevelDefinition::demo().spawn_into(&mut world);

        let mut ids: Vec<i64> = world.query::<&Trigger>().iter(&world).map(|t| t.id).collect();
        let portal_ids: Vec<i64> = world.query::<&Portal>().iter(&world).map(|p| p.id).collect();
        ids.extend(portal_ids);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(world.contains_resource::<LevelRes>());
    }

    #[test]
    fn test_load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.ron");
        let text = ron::ser::to_string(&LevelDefinition::demo()).unwrap();
        std::fs::write(&path, text).unwrap();
        let level = LevelDefinition::load(&path).unwrap();
        assert_eq!(level.name, "demo");
    }
}
