//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tilecast_select::{Algorithm, DEFAULT_FALLBACK_BUDGET, FrameFallback};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level player configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the prerecorded tiles live.
    pub tiles: TileSourceConfig,
    /// Quality selection settings.
    pub selector: SelectorConfig,
    /// Scripted playback settings.
    pub playback: PlaybackConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Location of the prerecorded tile descriptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TileSourceConfig {
    /// Root folder of the recording.
    pub folder: PathBuf,
    /// Per-tile subfolders, in tile order (front, right, back, left).
    pub tiles: Vec<String>,
    /// Per-quality subfolders, lowest quality first.
    pub qualities: Vec<String>,
}

/// Tile quality selection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    /// Which algorithm to run.
    pub algorithm: Algorithm,
    /// Byte budget per frame across all tiles.
    pub budget: f64,
    /// Budget substituted when `budget` is zero.
    pub fallback_budget: f64,
    /// Behaviour for frame indices past the end of the catalog.
    pub frame_fallback: FrameFallback,
    /// Log every per-frame decision.
    pub debug_decisions: bool,
}

/// Scripted playback settings for the player binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Number of ticks to play (0 = one pass over the catalog).
    pub frames: usize,
    /// Viewer rotation around the subject per tick, in degrees.
    pub orbit_degrees_per_frame: f32,
    /// Wrap the frame index around at the end of the catalog.
    pub loop_playback: bool,
    /// Scripted operator key presses as `(tick, digit)` pairs.
    pub key_presses: Vec<(usize, char)>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TileSourceConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("recording"),
            tiles: ["tile0", "tile1", "tile2", "tile3"]
                .map(String::from)
                .to_vec(),
            qualities: ["q0", "q1", "q2"].map(String::from).to_vec(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Interactive,
            budget: 1_000_000.0,
            fallback_budget: DEFAULT_FALLBACK_BUDGET,
            frame_fallback: FrameFallback::FirstFrame,
            debug_decisions: false,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frames: 0,
            orbit_degrees_per_frame: 3.0,
            loop_playback: true,
            key_presses: Vec::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::path(config_dir);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config =
                ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
                    path: config_path.clone(),
                    source,
                })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = Self::path(config_dir);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("algorithm: Interactive"));
        assert!(ron_str.contains("budget: 1000000"));
        assert!(ron_str.contains("frame_fallback: FirstFrame"));
    }

    #[test]
    fn test_algorithm_from_ron() {
        let config: Config =
            ron::from_str("(selector: (algorithm: Hybrid, budget: 250000.0))").unwrap();
        assert_eq!(config.selector.algorithm, Algorithm::Hybrid);
        assert_eq!(config.selector.budget, 250_000.0);
        assert_eq!(config.selector.fallback_budget, DEFAULT_FALLBACK_BUDGET);
        assert_eq!(config.tiles, TileSourceConfig::default());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let result: Result<Config, _> = ron::from_str("(selector: (algorithm: Optimal))");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(tiles: (folder: \"/data/loot\"))").unwrap();
        assert_eq!(config.tiles.folder, PathBuf::from("/data/loot"));
        assert_eq!(config.tiles.tiles.len(), 4);
        assert_eq!(config.playback, PlaybackConfig::default());
    }

    #[test]
    fn test_key_presses_from_ron() {
        let config: Config =
            ron::from_str("(playback: (key_presses: [(0, '9'), (40, '2')]))").unwrap();
        assert_eq!(config.playback.key_presses, vec![(0, '9'), (40, '2')]);
        assert!(config.playback.loop_playback);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.selector.algorithm = Algorithm::Greedy;
        config.selector.frame_fallback = FrameFallback::Strict;
        config.tiles.folder = PathBuf::from("/recordings/loot");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            Config::path(Path::new("/etc/tilecast")),
            PathBuf::from("/etc/tilecast/config.ron")
        );
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_error_message_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::path(dir.path());
        std::fs::write(&path, "(selector: (budget: \"lots\"))").unwrap();

        let err = Config::load_or_create(dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(&path.display().to_string()), "{message}");
        assert!(message.starts_with("invalid config"), "{message}");
    }

    #[test]
    fn test_unwritable_dir_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        match Config::default().save(&blocker.join("nested")) {
            Err(ConfigError::WriteError { path, .. }) => assert!(path.starts_with(&blocker)),
            other => panic!("expected WriteError, got {other:?}"),
        }
    }
}
