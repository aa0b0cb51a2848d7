use std::path::PathBuf;

use thiserror::Error;

/// Fatal level configuration problems. Raised at load time only; a map that
/// constructs successfully never fails a query.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map must be at least 1x1 (got {width}x{height})")]
    EmptyDimensions { width: usize, height: usize },
    #[error("map is {width}x{height} but holds {len} cells")]
    LengthMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML map file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no level with id {0}")]
    UnknownLevel(usize),
    #[error("random map side length must be between {min} and {max} (got {0})", min = crate::consts::RANDOM_MAP_SIDE_MIN, max = crate::consts::RANDOM_MAP_SIDE_MAX)]
    RandomSize(usize),
    #[error("a level set needs at least one level")]
    NoLevels,
}

#[derive(Debug, Error, PartialEq)]
pub enum FlagError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("--random-map requires a valid number (side length), got {0:?}")]
    InvalidSide(String),
    #[error("random map side length must be between {min} and {max} (got {0})", min = crate::consts::RANDOM_MAP_SIDE_MIN, max = crate::consts::RANDOM_MAP_SIDE_MAX)]
    SideOutOfRange(usize),
    #[error("cannot use both --random-map and --map at the same time")]
    ConflictingMaps,
    #[error("unknown argument {0:?}")]
    Unknown(String),
}
