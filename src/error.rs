use std::{io, path::PathBuf};

use thiserror::Error;

/// Recoverable failures reported back to the user. None of these end the
/// event loop.
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid folder name {0:?}")]
    InvalidName(String),
    #[error("{} is not a regular file or directory", .0.display())]
    Unsupported(PathBuf),
    #[error("cannot launch {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input failed: {0}")]
    Prompt(#[source] io::Error),
}

impl BrowseError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowseError>;
