//! Playback driver for the tile-quality selector.
//!
//! Owns the selector, feeds it gaze, budget and operator input once per tick,
//! and presents the resulting per-tile qualities to a [`SelectionSink`].

pub mod driver;
pub mod platform;
pub mod sink;
pub mod viewer;

pub use driver::{DriverStats, PlaybackDriver, PlaybackPlan, TickInput};
pub use platform::{PlatformDirs, PlatformError};
pub use sink::{QualityHistogram, SelectionSink};
pub use viewer::OrbitingViewer;
