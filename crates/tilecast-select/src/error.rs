//! Error types for catalog construction and per-tick selection.

use std::path::PathBuf;

/// Fatal problems with the tile catalog or selector setup.
///
/// These surface at startup; the owning pipeline must refuse to run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The number of tile folders (or in-memory tiles) is not the fixed tile count.
    #[error("expected {expected} tiles, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    /// A tile description file does not exist.
    #[error("tile description for tile {tile} not found at {}", path.display())]
    MissingDescription { tile: usize, path: PathBuf },

    /// A tile description file exists but could not be read.
    #[error("failed to read tile description {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be parsed.
    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A tile description holds no data rows.
    #[error("tile {tile} has no frames")]
    EmptyTile { tile: usize },

    /// The catalog offers no quality levels at all.
    #[error("catalog has no quality levels")]
    NoQualityLevels,

    /// The configured budget is negative or not finite.
    #[error("invalid budget {0}")]
    InvalidBudget(f64),

    /// Records disagree on the number of quality levels.
    #[error("tile {tile} frame {frame}: expected {expected} quality levels, got {actual}")]
    QualityCountMismatch {
        tile: usize,
        frame: usize,
        expected: usize,
        actual: usize,
    },

    /// Tiles disagree on the number of frames.
    #[error("tile {tile} has {actual} frames, tile 0 has {expected}")]
    FrameCountMismatch {
        tile: usize,
        expected: usize,
        actual: usize,
    },

    /// A size is negative, not finite, or smaller than the one below it.
    #[error("tile {tile} frame {frame}: cumulative sizes must be finite and non-decreasing")]
    InvalidSizes { tile: usize, frame: usize },
}

/// Recoverable per-tick selection failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectError {
    /// The catalog holds no record for the frame and strict indexing is on.
    #[error("frame index {index} out of range (catalog has {frame_count} frames)")]
    FrameIndexOutOfRange { index: usize, frame_count: usize },

    /// A viewer-direction or budget sample was rejected; the previous value stays.
    #[error("degraded input: {0}")]
    DegradedInput(String),
}
