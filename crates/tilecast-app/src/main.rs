//! The `tilecast` binary: plays a prerecorded tile catalog through the selector.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags,
//! e.g. `tilecast --folder /data/loot --algorithm hybrid --budget 250000`.

use clap::Parser;
use tilecast_app::{
    OrbitingViewer, PlatformDirs, PlatformError, PlaybackDriver, PlaybackPlan, QualityHistogram,
};
use tilecast_config::{CliArgs, Config, ConfigError};
use tilecast_select::{ConfigurationError, PresetKey, Tile, TileCatalog, TileQualitySelector};
use tracing::{info, warn};

/// Fatal startup errors.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot initialize tile selection: {0}")]
    Catalog(#[from] ConfigurationError),
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("tilecast: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    tilecast_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    // Config was read before a subscriber existed, so its own log lines are gone.
    info!(
        "Using config {}, logs in {}",
        Config::path(&dirs.config_dir).display(),
        dirs.log_dir.display()
    );

    let catalog = TileCatalog::load(&config.tiles.folder, &config.tiles.tiles)?;
    let quality_count = catalog.quality_count();
    let frame_count = catalog.frame_count();
    if !config.tiles.qualities.is_empty() && config.tiles.qualities.len() != quality_count {
        warn!(
            "Config lists {} quality folders but tile descriptions have {quality_count} levels",
            config.tiles.qualities.len()
        );
    }

    let selector = TileQualitySelector::new(
        catalog,
        config.selector.algorithm,
        config.selector.budget,
    )?
    .with_fallback_budget(config.selector.fallback_budget)?
    .with_frame_fallback(config.selector.frame_fallback)
    .with_debug_decisions(config.selector.debug_decisions);

    let plan = PlaybackPlan {
        ticks: match config.playback.frames {
            0 => frame_count,
            n => n,
        },
        loop_playback: config.playback.loop_playback,
        key_presses: config
            .playback
            .key_presses
            .iter()
            .filter_map(|&(tick, digit)| match PresetKey::from_digit(digit) {
                Some(key) => Some((tick, key)),
                None => {
                    warn!("Ignoring key press {digit:?} at tick {tick}: not a preset");
                    None
                }
            })
            .collect(),
    };

    let mut driver = PlaybackDriver::new(selector);
    let mut viewer = OrbitingViewer::new(0.0, config.playback.orbit_degrees_per_frame);
    let mut histogram = QualityHistogram::new(quality_count);
    let stats = driver.play(&plan, &mut viewer, &mut histogram);

    info!(
        ticks = stats.ticks,
        fresh = stats.fresh,
        held = stats.held,
        failed = stats.failed,
        degraded = stats.degraded_inputs,
        "Playback finished"
    );
    for tile in Tile::ALL {
        info!(
            "{tile:?} tile: mean quality {:.2}",
            histogram.mean_quality(tile.index())
        );
    }
    Ok(())
}
