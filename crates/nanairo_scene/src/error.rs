//! Error types for scene documents

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Scene document errors
#[derive(Debug, Error)]
pub enum SceneError {
    /// A symbolic name is not part of the registry
    #[error("Unknown symbol: '{0}'")]
    UnknownSymbol(String),

    /// Read access to a key the container doesn't have
    #[error("The item doesn't have '{0}' property")]
    MissingProperty(String),

    /// The document failed the validation pass
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Scene file does not exist
    #[error("Scene file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The path does not carry the scene file extension
    #[error("'{}' is not a nanairo scene file", .0.display())]
    NotSceneFile(PathBuf),

    /// The session has never been saved to or loaded from a file
    #[error("Scene has no file path")]
    NoFilePath,

    /// Malformed JSON text
    #[error("Failed to parse scene: {0}")]
    Parse(#[source] serde_json::Error),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SceneError {
    /// Shape and token errors are schema violations; everything else is a parse failure.
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => SceneError::Validation(
                ValidationError::SchemaViolation {
                    path: String::new(),
                    message: err.to_string(),
                },
            ),
            serde_json::error::Category::Io => {
                SceneError::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
            }
            _ => SceneError::Parse(err),
        }
    }
}

impl SceneError {
    /// Whether the error was raised by the validation pass or by schema checks
    pub fn is_validation(&self) -> bool {
        matches!(self, SceneError::Validation(_))
    }
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
