//! Error handling for the snapzones CLI.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for CLI operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Settings parsing or resolution errors.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),
    /// Layouts in the fixture were rejected by the store.
    #[error("Layout store error: {0}")]
    Store(#[from] snapzones_store::Error),
    /// The selector could not deliver events.
    #[error("Selector error: {0}")]
    Engine(#[from] snapzones_engine::Error),
    /// The fixture file could not be read or parsed.
    #[error("Fixture error at {path}: {message}")]
    Fixture {
        /// Fixture path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
    /// Generic error for unexpected conditions.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Helper for wrapping generic string errors.
    pub fn other<M: Into<String>>(msg: M) -> Self {
        Self::Other(msg.into())
    }
}
