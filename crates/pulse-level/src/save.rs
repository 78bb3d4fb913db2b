//! Persistent save data: best percents per level, stored as RON next to the
//! config file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::progress::LevelProgress;

/// Errors from reading or writing the save file.
#[derive(Error, Debug)]
pub enum SaveError {
    /// Could not read the save file.
    #[error("failed to read save file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid RON.
    #[error("failed to parse save file: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// The data could not be serialized.
    #[error("failed to serialize save data: {0}")]
    SerializeError(#[from] ron::Error),
}

/// Best percents for one level. Fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LevelSaveData {
    /// Best percent outside practice mode.
    pub normal_percent: f32,
    /// Best percent in practice mode.
    pub practice_percent: f32,
}

/// The whole save file, keyed by level name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveFile {
    /// Per-level records.
    #[serde(default)]
    pub levels: HashMap<String, LevelSaveData>,
}

impl SaveFile {
    /// Load the save file, or start fresh if it does not exist. A corrupt
    /// file is reported and replaced rather than aborting the game.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(save) => save,
                Err(err) => {
                    warn!("save file is corrupt, starting fresh: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write the save file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, contents)?;
        info!(path = %path.display(), "saved progress");
        Ok(())
    }

    /// Fold a level's in-memory progress into the record, keeping the better
    /// percent in each slot.
    pub fn record(&mut self, level_name: &str, progress: &LevelProgress) {
        let entry = self.levels.entry(level_name.to_owned()).or_default();
        entry.normal_percent = entry.normal_percent.max(progress.normal_percent);
        entry.practice_percent = entry.practice_percent.max(progress.practice_percent);
    }

    /// The stored record for a level, if any.
    #[must_use]
    pub fn level(&self, level_name: &str) -> Option<&LevelSaveData> {
        self.levels.get(level_name)
    }
}

/// Default save file location: `<config dir>/pulse/save.ron`.
#[must_use]
pub fn default_save_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pulse").join("save.ron"))
}
