//! Consumers of per-frame tile qualities.

use tilecast_select::TILE_COUNT;

/// Receives the quality assignment in force for each played frame.
///
/// This is where a renderer would fetch the matching per-tile representation.
pub trait SelectionSink {
    /// Called once per tick with the qualities to present for `frame_index`.
    fn present(&mut self, frame_index: usize, qualities: [usize; TILE_COUNT]);
}

/// Counts how often each tile was shown at each quality.
#[derive(Clone, Debug)]
pub struct QualityHistogram {
    counts: Vec<[u64; TILE_COUNT]>,
    frames: u64,
}

impl QualityHistogram {
    /// Histogram for `quality_count` levels.
    pub fn new(quality_count: usize) -> Self {
        Self {
            counts: vec![[0; TILE_COUNT]; quality_count],
            frames: 0,
        }
    }

    /// Number of frames presented.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames in which `tile` was shown at `quality`.
    pub fn count(&self, tile: usize, quality: usize) -> u64 {
        self.counts[quality][tile]
    }

    /// Mean quality index of `tile` over all presented frames.
    pub fn mean_quality(&self, tile: usize) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        let weighted: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(q, row)| q as u64 * row[tile])
            .sum();
        weighted as f64 / self.frames as f64
    }
}

impl SelectionSink for QualityHistogram {
    fn present(&mut self, _frame_index: usize, qualities: [usize; TILE_COUNT]) {
        for (tile, &q) in qualities.iter().enumerate() {
            self.counts[q][tile] += 1;
        }
        self.frames += 1;
    }
}
