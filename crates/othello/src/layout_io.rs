//! Layout file loading.
//!
//! Initial boards are JSON grids in the original data format: an array of
//! rows, each an array of 0/1/2 cell values (0 = empty, 1 = black,
//! 2 = white).

use std::path::Path;

use derive_more::{Display, Error};
use othello_core::{InvalidLayoutError, Layout};
use tracing::debug;

/// Failure while loading a layout file. These surface as configuration
/// errors at startup, never mid-game.
#[derive(Debug, Display, Error)]
pub enum LayoutFileError {
    /// The file could not be read.
    #[display("failed to read layout file {path}: {source}")]
    Io {
        /// The offending path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not a JSON grid of numbers.
    #[display("layout file {path} is not a JSON grid: {source}")]
    Json {
        /// The offending path.
        path: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The grid does not describe a valid board.
    #[display("layout file {path} is invalid: {source}")]
    Invalid {
        /// The offending path.
        path: String,
        /// Underlying validation error.
        source: InvalidLayoutError,
    },
}

/// Loads and validates a JSON layout file.
pub fn load_layout(path: &Path) -> Result<Layout, LayoutFileError> {
    let path_str = path.display().to_string();
    debug!(path = %path_str, "loading layout file");

    let text = std::fs::read_to_string(path).map_err(|source| LayoutFileError::Io {
        path: path_str.clone(),
        source,
    })?;

    let grid: Vec<Vec<u8>> =
        serde_json::from_str(&text).map_err(|source| LayoutFileError::Json {
            path: path_str.clone(),
            source,
        })?;

    Layout::from_grid(&grid).map_err(|source| LayoutFileError::Invalid {
        path: path_str,
        source,
    })
}
