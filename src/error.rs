use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected game configuration. Reported before any entity is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    CellSizeZero,
    #[error("playable area gives a {tiles_x}x{tiles_y} grid, need at least {min}x{min}", min = crate::grid::MIN_TILES)]
    AreaTooSmall { tiles_x: u32, tiles_y: u32 },
    #[error("playable area gives a {tiles_x}x{tiles_y} grid, at most {max} tiles per side", max = crate::grid::MAX_TILES)]
    AreaTooLarge { tiles_x: u32, tiles_y: u32 },
}

/// Failure reading or writing the persisted high score.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed high score file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
