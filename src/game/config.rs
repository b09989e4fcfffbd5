// Game configuration
//
// Everything tunable lives in one JSON document. Every section is optional
// and falls back to the built-in defaults.

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use super::characters::{AnimationNames, ControllerSettings};
use super::enemies::EnemySettings;
use super::explosion::ExplosionSettings;
use super::level::LevelLayout;
use super::projectiles::ProjectileSettings;
use crate::engine::assets::{load_json_file, AssetError, AssetLoader, AssetType};
use crate::engine::audio::AudioConfig;
use crate::engine::input::AxisSettings;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "SNOTBALL_CONFIG";
/// Environment variable fixing the world's random seed
pub const SEED_ENV: &str = "SNOTBALL_SEED";
pub const ASSET_ROOT: &str = "assets";
pub const CONFIG_FILE: &str = "game.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub controller: ControllerSettings,
    pub animations: AnimationNames,
    pub audio: AudioConfig,
    pub input: AxisSettings,
    pub projectiles: ProjectileSettings,
    pub enemies: EnemySettings,
    pub explosion: ExplosionSettings,
    pub level: LevelLayout,
}

impl GameConfig {
    /// Where the config is read from: `$SNOTBALL_CONFIG`, else `assets/config/game.json`
    pub fn default_path() -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => AssetLoader::new(ASSET_ROOT).resolve_path(AssetType::Config, CONFIG_FILE),
        }
    }

    /// Load the config. A missing file means defaults; a broken one is an error.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        match load_json_file::<Self, _>(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(err) => match err.downcast_ref::<AssetError>() {
                Some(AssetError::NotFound(_)) => {
                    warn!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
                _ => Err(err),
            },
        }
    }
}

/// Parse a seed override. Blank or non-numeric values are ignored with a warning.
pub fn parse_seed(value: Option<&str>) -> Option<u64> {
    let value = value?.trim();
    match value.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(err) => {
            warn!("Ignoring {}={:?}: {}", SEED_ENV, value, err);
            None
        }
    }
}

/// Seed for a new world: `$SNOTBALL_SEED` if set, else derived from the clock
pub fn world_seed() -> u64 {
    let value = std::env::var(SEED_ENV).ok();
    if let Some(seed) = parse_seed(value.as_deref()) {
        info!("Using seed {} from {}", seed, SEED_ENV);
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().rotate_left(32) ^ u64::from(d.subsec_nanos()))
        .unwrap_or_default()
}
