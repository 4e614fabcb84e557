//! Per-frame tile-quality selection under a byte budget.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::catalog::{FrameCosts, TileCatalog};
use crate::error::{ConfigurationError, SelectError};
use crate::interactive::{PresetKey, winning_preset};
use crate::orientation::{TILE_COUNT, tile_order, tile_visibility};
use crate::strategy::{self, Algorithm};

/// Budget used when the configured budget is exactly zero.
pub const DEFAULT_FALLBACK_BUDGET: f64 = 100_000.0;

/// What to do when asked for a frame the catalog does not hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameFallback {
    /// Serve the request from frame 0 and log a warning.
    #[default]
    FirstFrame,
    /// Fail with [`SelectError::FrameIndexOutOfRange`].
    Strict,
}

/// Result of one selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSelection {
    /// Quality index per tile, each in `0..quality_count`.
    pub qualities: [usize; TILE_COUNT],
    /// Tiles ordered by descending utility for the gaze used.
    pub tile_order: [usize; TILE_COUNT],
    /// Total cumulative size of the chosen representations.
    pub spent: f64,
}

/// Chooses a quality level per tile for each frame.
///
/// The catalog is read-only; the algorithm, budget and gaze are updated by
/// the owner between ticks. Selection itself does not mutate the selector.
pub struct TileQualitySelector {
    catalog: TileCatalog,
    algorithm: Algorithm,
    budget: f64,
    fallback_budget: f64,
    gaze: Vec3,
    frame_fallback: FrameFallback,
    debug_decisions: bool,
}

impl TileQualitySelector {
    /// Create a selector looking at the front tile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the catalog has no quality levels or
    /// the budget is not a finite non-negative number.
    pub fn new(
        catalog: TileCatalog,
        algorithm: Algorithm,
        budget: f64,
    ) -> Result<Self, ConfigurationError> {
        validate_catalog(&catalog)?;
        validate_config_budget(budget)?;
        info!(
            "Tile selector: {} qualities, {} frames, algorithm={algorithm}, budget={budget}",
            catalog.quality_count(),
            catalog.frame_count()
        );
        Ok(Self {
            catalog,
            algorithm,
            budget,
            fallback_budget: DEFAULT_FALLBACK_BUDGET,
            gaze: Vec3::NEG_Z,
            frame_fallback: FrameFallback::default(),
            debug_decisions: false,
        })
    }

    /// Replace catalog, algorithm and budget at once. The gaze is kept.
    ///
    /// # Errors
    ///
    /// Same conditions as [`new`](Self::new); on error nothing changes.
    pub fn configure(
        &mut self,
        catalog: TileCatalog,
        algorithm: Algorithm,
        budget: f64,
    ) -> Result<(), ConfigurationError> {
        validate_catalog(&catalog)?;
        validate_config_budget(budget)?;
        self.catalog = catalog;
        self.algorithm = algorithm;
        self.budget = budget;
        info!("Tile selector reconfigured: algorithm={algorithm}, budget={budget}");
        Ok(())
    }

    /// Builder-style frame fallback policy.
    #[must_use]
    pub fn with_frame_fallback(mut self, policy: FrameFallback) -> Self {
        self.frame_fallback = policy;
        self
    }

    /// Builder-style substitute for a zero budget.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidBudget`] unless `budget` is a
    /// finite non-negative number.
    pub fn with_fallback_budget(mut self, budget: f64) -> Result<Self, ConfigurationError> {
        validate_config_budget(budget)?;
        self.fallback_budget = budget;
        Ok(self)
    }

    /// Log every decision at info level instead of trace.
    #[must_use]
    pub fn with_debug_decisions(mut self, enabled: bool) -> Self {
        self.debug_decisions = enabled;
        self
    }

    /// Switch algorithm for subsequent ticks.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm != self.algorithm {
            debug!("Tile selection algorithm: {} -> {algorithm}", self.algorithm);
        }
        self.algorithm = algorithm;
    }

    /// Update the byte budget.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::DegradedInput`] for a negative or non-finite
    /// budget; the previous budget stays in effect.
    pub fn set_budget(&mut self, budget: f64) -> Result<(), SelectError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(SelectError::DegradedInput(format!(
                "budget {budget} rejected, keeping {}",
                self.budget
            )));
        }
        self.budget = budget;
        Ok(())
    }

    /// Update the viewer's forward direction. The vector is normalized.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::DegradedInput`] for a zero-length or non-finite
    /// vector; the last known direction stays in effect.
    pub fn set_viewer_direction(&mut self, forward: Vec3) -> Result<(), SelectError> {
        match forward.try_normalize() {
            Some(dir) => {
                self.gaze = dir;
                Ok(())
            }
            None => Err(SelectError::DegradedInput(format!(
                "viewer direction {forward} rejected, keeping {}",
                self.gaze
            ))),
        }
    }

    /// Current algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Configured budget (before zero-budget substitution).
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Last accepted viewer direction.
    pub fn viewer_direction(&self) -> Vec3 {
        self.gaze
    }

    /// The catalog selections are made from.
    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Select qualities for `frame_index`.
    ///
    /// `keys` are the operator presets pressed this tick; only the interactive
    /// algorithm reads them. Returns `Ok(None)` when the interactive algorithm
    /// saw no preset, meaning the previous selection should stay. That answer
    /// does not depend on the frame, so it is given even for unknown frames.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::FrameIndexOutOfRange`] for an unknown frame
    /// under [`FrameFallback::Strict`] whenever a selection would be made,
    /// presets included: every selection reports what it spends on that frame.
    pub fn select_qualities(
        &self,
        frame_index: usize,
        keys: &[PresetKey],
    ) -> Result<Option<TileSelection>, SelectError> {
        let max_quality = self.catalog.max_quality();
        let preset = match self.algorithm {
            Algorithm::Interactive => match winning_preset(keys) {
                Some(key) => Some(key),
                None => return Ok(None),
            },
            _ => None,
        };
        let costs = self.frame_costs(frame_index)?;
        let order = tile_order(self.gaze);

        let selection = match self.algorithm {
            Algorithm::Interactive => preset.map(|key| {
                let qualities = key.qualities(max_quality);
                TileSelection {
                    qualities,
                    tile_order: order,
                    spent: costs.spend(&qualities),
                }
            }),
            Algorithm::AlwaysBest => {
                let qualities = [max_quality; TILE_COUNT];
                Some(TileSelection {
                    qualities,
                    tile_order: order,
                    spent: costs.spend(&qualities),
                })
            }
            Algorithm::FrontTileBest => {
                let qualities = strategy::front_tile_best(&order, max_quality);
                Some(TileSelection {
                    qualities,
                    tile_order: order,
                    spent: costs.spend(&qualities),
                })
            }
            Algorithm::Greedy | Algorithm::Uniform | Algorithm::Hybrid => {
                let budget = self.effective_budget();
                let alloc = match self.algorithm {
                    Algorithm::Greedy => strategy::greedy(costs, &order, budget),
                    Algorithm::Uniform => strategy::uniform(costs, &order, budget),
                    _ => strategy::hybrid(costs, &order, &tile_visibility(self.gaze), budget),
                };
                Some(TileSelection {
                    qualities: alloc.qualities,
                    tile_order: order,
                    spent: alloc.spent,
                })
            }
        };

        if let Some(sel) = &selection {
            let q = sel.qualities;
            if self.debug_decisions {
                info!(
                    frame = frame_index,
                    algorithm = %self.algorithm,
                    spent = sel.spent,
                    "tileQualities: {}, {}, {}, {}",
                    q[0], q[1], q[2], q[3]
                );
            } else {
                trace!(frame = frame_index, ?q, spent = sel.spent, "tile qualities selected");
            }
        }
        Ok(selection)
    }

    fn effective_budget(&self) -> f64 {
        if self.budget == 0.0 {
            self.fallback_budget
        } else {
            self.budget
        }
    }

    fn frame_costs(&self, frame_index: usize) -> Result<FrameCosts<'_>, SelectError> {
        if let Some(costs) = self.catalog.frame_costs(frame_index) {
            return Ok(costs);
        }
        let out_of_range = SelectError::FrameIndexOutOfRange {
            index: frame_index,
            frame_count: self.catalog.frame_count(),
        };
        match self.frame_fallback {
            FrameFallback::Strict => Err(out_of_range),
            FrameFallback::FirstFrame => {
                warn!("{out_of_range}, falling back to frame 0");
                self.catalog.frame_costs(0).ok_or(out_of_range)
            }
        }
    }
}

fn validate_catalog(catalog: &TileCatalog) -> Result<(), ConfigurationError> {
    if catalog.quality_count() < 1 {
        return Err(ConfigurationError::NoQualityLevels);
    }
    Ok(())
}

fn validate_config_budget(budget: f64) -> Result<(), ConfigurationError> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(ConfigurationError::InvalidBudget(budget));
    }
    Ok(())
}
