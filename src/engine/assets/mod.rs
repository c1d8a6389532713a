// Assets: path resolution, decoding, and a load-once cache
//
// Every image and map is keyed by its resolved path, so entering a mode or
// reloading a level never decodes the same file twice.

mod cache;
mod handle;
mod loader;

pub use cache::{AssetCache, AssetStats, FrameImage};
pub use handle::AssetId;
pub use loader::{AssetLoader, AssetType};

use crate::engine::tilemap::MapError;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("missing asset {0}")]
    NotFound(String),

    #[error("cannot decode asset: {0}")]
    LoadError(String),

    #[error("malformed map {path}: {source}")]
    Map {
        path: String,
        #[source]
        source: MapError,
    },

    #[error("I/O error reading asset: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_path() {
        let err = AssetError::NotFound("assets/maps/map2.txt".to_string());
        assert_eq!(err.to_string(), "missing asset assets/maps/map2.txt");
    }

    #[test]
    fn test_map_error_keeps_cause() {
        let err = AssetError::Map {
            path: "maps/broken.txt".to_string(),
            source: MapError::MissingHeader,
        };
        assert_eq!(
            err.to_string(),
            "malformed map maps/broken.txt: map has no size header"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
