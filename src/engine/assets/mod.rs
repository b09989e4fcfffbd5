// Asset system
//
// Typed handles for sound clips and path resolution plus JSON loading for
// game configuration files.

mod handle;
mod loader;

pub use handle::SoundHandle;
pub use loader::{load_json_file, AssetLoader, AssetType};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("game.json".to_string());
        assert_eq!(err.to_string(), "Asset not found: game.json");
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = AssetError::Parse {
            path: "config/game.json".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Failed to parse config/game.json"));
    }
}
