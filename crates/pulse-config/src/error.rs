//! Errors for the runner's configuration layer.

use std::path::PathBuf;

/// Errors raised while loading or persisting `config.ron`.
///
/// Every filesystem variant carries the offending path so the log line
/// points straight at the file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("could not read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file or its directory could not be written.
    #[error("could not write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid RON for the config schema.
    #[error("malformed config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },

    /// The in-memory config could not be rendered to RON.
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

impl ConfigError {
    /// The file the error points at, when there is one.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::Parse { path, .. } => {
                Some(path)
            }
            Self::Serialize(_) => None,
        }
    }
}
