//! Error type for the file-backed surfaces (definitions, config, saves).
//!
//! The animation resolver itself never fails; everything here comes from
//! reading or writing files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnimError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Audio thread failed to start: {0}")]
    AudioThread(#[source] std::io::Error),
}

impl AnimError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnimError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnimError>;
