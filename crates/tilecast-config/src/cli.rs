//! Command-line argument parsing for the tile-selection player.

use std::path::PathBuf;

use clap::Parser;
use tilecast_select::Algorithm;

use crate::Config;

/// Player command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "tilecast", about = "Adaptive tile-quality selection player")]
pub struct CliArgs {
    /// Root folder of the prerecorded tiles.
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Selection algorithm (interactive, always-best, front-tile-best, greedy, uniform, hybrid).
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Byte budget per frame.
    #[arg(long)]
    pub budget: Option<f64>,

    /// Number of ticks to play.
    #[arg(long)]
    pub frames: Option<usize>,

    /// Log every per-frame decision.
    #[arg(long)]
    pub debug_decisions: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref folder) = args.folder {
            self.tiles.folder = folder.clone();
        }
        if let Some(algorithm) = args.algorithm {
            self.selector.algorithm = algorithm;
        }
        if let Some(budget) = args.budget {
            self.selector.budget = budget;
        }
        if let Some(frames) = args.frames {
            self.playback.frames = frames;
        }
        if args.debug_decisions {
            self.selector.debug_decisions = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> CliArgs {
        CliArgs {
            folder: None,
            algorithm: None,
            budget: None,
            frames: None,
            debug_decisions: false,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            algorithm: Some(Algorithm::Uniform),
            budget: Some(250_000.0),
            ..no_overrides()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.selector.algorithm, Algorithm::Uniform);
        assert_eq!(config.selector.budget, 250_000.0);
        // Non-overridden fields retain defaults
        assert_eq!(config.playback.frames, 0);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&no_overrides());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_algorithm_names() {
        let args = CliArgs::try_parse_from([
            "tilecast",
            "--algorithm",
            "front-tile-best",
            "--budget",
            "5e5",
            "--debug-decisions",
        ])
        .unwrap();
        assert_eq!(args.algorithm, Some(Algorithm::FrontTileBest));
        assert_eq!(args.budget, Some(500_000.0));
        assert!(args.debug_decisions);

        assert!(CliArgs::try_parse_from(["tilecast", "--algorithm", "optimal"]).is_err());
    }
}
