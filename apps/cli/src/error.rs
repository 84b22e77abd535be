//! Error handling for the md2anki binary.

use md2anki_core::ScratchError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Scratch file error: {0}")]
    Scratch(#[from] ScratchError),

    #[error("Failed to launch editor '{editor}': {source}")]
    EditorLaunch {
        editor: String,
        #[source]
        source: io::Error,
    },

    #[error("Editor '{editor}' exited with {status}")]
    EditorFailed { editor: String, status: ExitStatus },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Pipeline error: {0} channel closed")]
    ChannelClosed(&'static str),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl AppError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this is only the echo of another stage going away.
    pub fn is_channel_closed(&self) -> bool {
        matches!(self, Self::ChannelClosed(_))
    }
}

/// Result type alias for md2anki operations.
pub type Result<T> = std::result::Result<T, AppError>;
