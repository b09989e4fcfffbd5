// Asset lookup and config loading

use super::AssetError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Sound,
    Config,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Sound => "sounds",
            AssetType::Config => "config",
        }
    }
}

/// Asset loader responsible for finding and reading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Path relative to the base directory, used as the key for sound handles
    pub fn asset_key(asset_type: AssetType, name: &str) -> String {
        format!("{}/{}", asset_type.default_directory(), name)
    }
}

/// Read a JSON file from an explicit path
pub fn load_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetError::NotFound(path.display().to_string()).into());
    }

    let text = std::fs::read_to_string(path)
        .map_err(AssetError::from)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_json(&text, &path.display().to_string())
}

/// Parse JSON text, tagging errors with where it came from
fn parse_json<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| {
        AssetError::Parse {
            path: origin.to_string(),
            source,
        }
        .into()
    })
}
