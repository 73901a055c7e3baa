//! Error types for the shell

use std::path::PathBuf;
use thiserror::Error;

use nanairo_scene::SceneError;

/// Shell errors
#[derive(Debug, Error)]
pub enum ShellError {
    /// Scene loading, validation or saving failed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Config file could not be parsed
    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Preset exists only as a scene file shipped with the editor
    #[error("Preset '{0}' is not built in")]
    ExternalPreset(String),

    /// Scene file has validation errors
    #[error("{path} has {count} validation error(s)")]
    Invalid { path: String, count: usize },

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
