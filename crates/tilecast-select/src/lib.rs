//! Gaze-driven, budget-constrained quality selection for tiled point-cloud streaming.

mod catalog;
mod error;
mod interactive;
mod orientation;
mod selector;
mod strategy;

pub use catalog::{DESCRIPTION_FILE, FrameCosts, FrameRecord, TileCatalog};
pub use error::{ConfigurationError, SelectError};
pub use interactive::{PresetKey, winning_preset};
pub use orientation::{TILE_COUNT, TILE_ORIENTATIONS, Tile, tile_order, tile_utilities, tile_visibility};
pub use selector::{DEFAULT_FALLBACK_BUDGET, FrameFallback, TileQualitySelector, TileSelection};
pub use strategy::Algorithm;
