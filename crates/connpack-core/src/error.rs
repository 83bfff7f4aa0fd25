//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Source file not found: {}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    SourceParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Expected a mapping of connections in {}, found {found}", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("Connection id must be a string in {}, found {key}", .path.display())]
    InvalidKey { path: PathBuf, key: String },

    #[error("Failed to serialize connection to JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid connection payload: {message}")]
    InvalidPayload { message: String },
}

impl CoreError {
    /// Whether this error means the source exists but its contents are unusable
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::SourceParse { .. }
                | Self::NotAMapping { .. }
                | Self::InvalidKey { .. }
                | Self::Json(_)
        )
    }

    /// Path of the source document involved, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::SourceNotFound { path, .. }
            | Self::SourceParse { path, .. }
            | Self::NotAMapping { path, .. }
            | Self::InvalidKey { path, .. } => Some(path),
            Self::Json(_) | Self::InvalidPayload { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
