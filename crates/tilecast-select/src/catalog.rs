//! Per-tile, per-frame encoded-size tables and the CSV loader that builds them.
//!
//! A [`TileCatalog`] is built once at startup and never changes afterwards.
//! Each tile owns one [`FrameRecord`] per frame; a record lists the cumulative
//! encoded size of the tile at every quality level.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ConfigurationError;
use crate::orientation::TILE_COUNT;

/// File name of the per-tile description inside each tile folder.
pub const DESCRIPTION_FILE: &str = "tiledescription.csv";

/// Encoded sizes of one tile for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    /// Identifier of the source frame (first CSV column).
    pub frame_id: String,
    /// `cumulative_sizes[q]` is the byte cost of the tile at quality `q`.
    pub cumulative_sizes: Vec<f64>,
}

impl FrameRecord {
    /// Create a record from a frame id and its cumulative sizes.
    pub fn new(frame_id: impl Into<String>, cumulative_sizes: Vec<f64>) -> Self {
        Self {
            frame_id: frame_id.into(),
            cumulative_sizes,
        }
    }
}

/// Read-only lookup table of encoded sizes for all tiles.
#[derive(Clone, Debug)]
pub struct TileCatalog {
    tiles: Vec<Vec<FrameRecord>>,
    quality_count: usize,
    frame_count: usize,
}

impl TileCatalog {
    /// Build a catalog from in-memory records, one `Vec` per tile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the tile count is wrong, a tile is
    /// empty, tiles disagree on frame or quality counts, or any size sequence
    /// is not finite and non-decreasing.
    pub fn from_tiles(tiles: Vec<Vec<FrameRecord>>) -> Result<Self, ConfigurationError> {
        if tiles.len() != TILE_COUNT {
            return Err(ConfigurationError::TileCountMismatch {
                expected: TILE_COUNT,
                actual: tiles.len(),
            });
        }

        let frame_count = tiles[0].len();
        let quality_count = tiles[0]
            .first()
            .map(|r| r.cumulative_sizes.len())
            .ok_or(ConfigurationError::EmptyTile { tile: 0 })?;
        if quality_count == 0 {
            return Err(ConfigurationError::NoQualityLevels);
        }

        for (tile, records) in tiles.iter().enumerate() {
            if records.is_empty() {
                return Err(ConfigurationError::EmptyTile { tile });
            }
            if records.len() != frame_count {
                return Err(ConfigurationError::FrameCountMismatch {
                    tile,
                    expected: frame_count,
                    actual: records.len(),
                });
            }
            for (frame, record) in records.iter().enumerate() {
                let sizes = &record.cumulative_sizes;
                if sizes.len() != quality_count {
                    return Err(ConfigurationError::QualityCountMismatch {
                        tile,
                        frame,
                        expected: quality_count,
                        actual: sizes.len(),
                    });
                }
                let valid = sizes.iter().all(|s| s.is_finite() && *s >= 0.0)
                    && sizes.windows(2).all(|w| w[1] >= w[0]);
                if !valid {
                    return Err(ConfigurationError::InvalidSizes { tile, frame });
                }
            }
        }

        Ok(Self {
            tiles,
            quality_count,
            frame_count,
        })
    }

    /// Load `<root>/<tile_folders[i]>/tiledescription.csv` for every tile.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ConfigurationError`] if a folder is missing from the
    /// list, a file is absent or unreadable, or any row is malformed.
    pub fn load(root: &Path, tile_folders: &[String]) -> Result<Self, ConfigurationError> {
        if tile_folders.len() != TILE_COUNT {
            return Err(ConfigurationError::TileCountMismatch {
                expected: TILE_COUNT,
                actual: tile_folders.len(),
            });
        }

        let mut tiles = Vec::with_capacity(TILE_COUNT);
        for (tile, folder) in tile_folders.iter().enumerate() {
            let path = root.join(folder).join(DESCRIPTION_FILE);
            if !path.is_file() {
                return Err(ConfigurationError::MissingDescription { tile, path });
            }
            let contents =
                std::fs::read_to_string(&path).map_err(|source| ConfigurationError::ReadError {
                    path: path.clone(),
                    source,
                })?;
            let records = parse_description(&contents, &path)?;
            debug!(tile, frames = records.len(), path = %path.display(), "Loaded tile description");
            tiles.push(records);
        }

        let catalog = Self::from_tiles(tiles)?;
        info!(
            "Loaded tile catalog from {}: {} frames, {} qualities",
            root.display(),
            catalog.frame_count,
            catalog.quality_count
        );
        Ok(catalog)
    }

    /// Number of quality levels per tile.
    pub fn quality_count(&self) -> usize {
        self.quality_count
    }

    /// Number of frames shared by all tiles.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Highest quality index.
    pub fn max_quality(&self) -> usize {
        self.quality_count - 1
    }

    /// Records of one tile, in frame order.
    pub fn tile_records(&self, tile: usize) -> &[FrameRecord] {
        &self.tiles[tile]
    }

    /// Size tables of all tiles at `frame_index`, or `None` past the end.
    pub fn frame_costs(&self, frame_index: usize) -> Option<FrameCosts<'_>> {
        if frame_index >= self.frame_count {
            return None;
        }
        let sizes = std::array::from_fn(|t| self.tiles[t][frame_index].cumulative_sizes.as_slice());
        Some(FrameCosts::new(sizes))
    }
}

/// Borrowed view of the cumulative sizes of every tile for a single frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameCosts<'a> {
    sizes: [&'a [f64]; TILE_COUNT],
}

impl<'a> FrameCosts<'a> {
    /// Wrap per-tile size slices. All slices must have the same non-zero length,
    /// which [`TileCatalog`] guarantees for the views it hands out.
    pub(crate) fn new(sizes: [&'a [f64]; TILE_COUNT]) -> Self {
        debug_assert!(sizes.iter().all(|s| !s.is_empty() && s.len() == sizes[0].len()));
        Self { sizes }
    }

    /// Number of quality levels.
    pub fn quality_count(&self) -> usize {
        self.sizes[0].len()
    }

    /// Cumulative size of `tile` at `quality`.
    pub fn size(&self, tile: usize, quality: usize) -> f64 {
        self.sizes[tile][quality]
    }

    /// Extra bytes needed to raise `tile` from `quality` to `quality + 1`.
    pub fn marginal_cost(&self, tile: usize, quality: usize) -> f64 {
        self.sizes[tile][quality + 1] - self.sizes[tile][quality]
    }

    /// Cost of every tile at quality 0.
    pub fn baseline(&self) -> f64 {
        self.sizes.iter().map(|s| s[0]).sum()
    }

    /// Total cost of the given per-tile assignment.
    pub fn spend(&self, qualities: &[usize; TILE_COUNT]) -> f64 {
        qualities
            .iter()
            .enumerate()
            .map(|(tile, &q)| self.sizes[tile][q])
            .sum()
    }
}

/// Parse the contents of a tile description file. The first line is a header.
fn parse_description(contents: &str, path: &Path) -> Result<Vec<FrameRecord>, ConfigurationError> {
    let malformed = |line: usize, reason: String| ConfigurationError::Malformed {
        path: PathBuf::from(path),
        line,
        reason,
    };

    let mut records = Vec::new();
    for (idx, line) in contents.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let frame_id = fields.next().unwrap_or_default().to_string();
        let sizes = fields
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| malformed(line_no, format!("invalid size {field:?}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if sizes.is_empty() {
            return Err(malformed(line_no, "row has no sizes".to_string()));
        }
        records.push(FrameRecord::new(frame_id, sizes));
    }
    Ok(records)
}
