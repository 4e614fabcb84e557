//! Tick driver that owns the selector and the selection currently in force.
//!
//! The selector answers one frame at a time and keeps no history. The driver
//! holds on to the last good selection so that an interactive tick without a
//! key press, or a tick that fails, keeps showing what was shown before.

use glam::Vec3;
use tilecast_select::{PresetKey, TILE_COUNT, TileQualitySelector, TileSelection};
use tracing::{debug, info, warn};

use crate::sink::SelectionSink;
use crate::viewer::OrbitingViewer;

/// Everything the driver receives for one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickInput<'a> {
    /// Frame the player is about to show.
    pub frame_index: usize,
    /// Viewer forward vector, if the camera reported one this tick.
    pub gaze: Option<Vec3>,
    /// Bandwidth estimate, if the estimator reported one this tick.
    pub budget: Option<f64>,
    /// Operator presets pressed this tick.
    pub keys: &'a [PresetKey],
}

impl TickInput<'_> {
    /// Input carrying only a frame index.
    pub fn frame(frame_index: usize) -> Self {
        Self {
            frame_index,
            gaze: None,
            budget: None,
            keys: &[],
        }
    }
}

/// Counters describing how a playback went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Ticks processed.
    pub ticks: u64,
    /// Ticks that produced a new selection.
    pub fresh: u64,
    /// Ticks that kept the previous selection because nothing was chosen.
    pub held: u64,
    /// Ticks whose selection failed.
    pub failed: u64,
    /// Rejected gaze or budget samples.
    pub degraded_inputs: u64,
}

/// Settings for [`PlaybackDriver::play`].
#[derive(Clone, Debug, Default)]
pub struct PlaybackPlan {
    /// Ticks to run.
    pub ticks: usize,
    /// Wrap the frame index at the end of the catalog instead of running past it.
    pub loop_playback: bool,
    /// `(tick, preset)` pairs delivered on the given tick.
    pub key_presses: Vec<(usize, PresetKey)>,
}

/// Feeds a [`TileQualitySelector`] once per tick.
pub struct PlaybackDriver {
    selector: TileQualitySelector,
    last: Option<TileSelection>,
    stats: DriverStats,
}

impl PlaybackDriver {
    /// Wrap a configured selector. Nothing is selected yet.
    pub fn new(selector: TileQualitySelector) -> Self {
        Self {
            selector,
            last: None,
            stats: DriverStats::default(),
        }
    }

    /// The selector being driven.
    pub fn selector(&self) -> &TileQualitySelector {
        &self.selector
    }

    /// Mutable access for algorithm switches between ticks.
    pub fn selector_mut(&mut self) -> &mut TileQualitySelector {
        &mut self.selector
    }

    /// Selection currently in force, if any tick produced one.
    pub fn last_selection(&self) -> Option<&TileSelection> {
        self.last.as_ref()
    }

    /// Qualities currently in force; all lowest before the first selection.
    pub fn current_qualities(&self) -> [usize; TILE_COUNT] {
        self.last.map_or([0; TILE_COUNT], |s| s.qualities)
    }

    /// Counters so far.
    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Apply one tick of input and return the qualities in force afterwards.
    ///
    /// Bad samples and failed selections are logged and counted; they never
    /// stop playback.
    pub fn tick(&mut self, input: TickInput<'_>) -> [usize; TILE_COUNT] {
        self.stats.ticks += 1;

        match input.gaze {
            Some(gaze) => {
                if let Err(e) = self.selector.set_viewer_direction(gaze) {
                    warn!(frame = input.frame_index, "{e}");
                    self.stats.degraded_inputs += 1;
                }
            }
            None => debug!(frame = input.frame_index, "no viewer direction, keeping last"),
        }
        if let Some(budget) = input.budget
            && let Err(e) = self.selector.set_budget(budget)
        {
            warn!(frame = input.frame_index, "{e}");
            self.stats.degraded_inputs += 1;
        }

        match self.selector.select_qualities(input.frame_index, input.keys) {
            Ok(Some(selection)) => {
                self.last = Some(selection);
                self.stats.fresh += 1;
            }
            Ok(None) => self.stats.held += 1,
            Err(e) => {
                warn!(frame = input.frame_index, "selection failed, keeping previous: {e}");
                self.stats.failed += 1;
            }
        }
        self.current_qualities()
    }

    /// Run a scripted playback, presenting every tick to `sink`.
    pub fn play(
        &mut self,
        plan: &PlaybackPlan,
        viewer: &mut OrbitingViewer,
        sink: &mut impl SelectionSink,
    ) -> DriverStats {
        let frame_count = self.selector.catalog().frame_count();
        info!(
            "Playing {} ticks over {frame_count} frames, algorithm={}",
            plan.ticks,
            self.selector.algorithm()
        );

        let mut keys = Vec::new();
        for tick in 0..plan.ticks {
            let frame_index = if plan.loop_playback {
                tick % frame_count
            } else {
                tick
            };
            keys.clear();
            keys.extend(
                plan.key_presses
                    .iter()
                    .filter(|(at, _)| *at == tick)
                    .map(|(_, key)| *key),
            );

            let qualities = self.tick(TickInput {
                frame_index,
                gaze: Some(viewer.advance()),
                budget: None,
                keys: &keys,
            });
            sink.present(frame_index, qualities);
        }
        self.stats
    }
}
