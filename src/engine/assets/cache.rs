// Path-keyed asset cache

use super::{AssetError, AssetId, AssetLoader, AssetType};
use crate::engine::tilemap::TileMap;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// A decoded RGBA image shared between clips, modes and the render surface
pub type FrameImage = Arc<image::RgbaImage>;

/// Central asset cache for the game
///
/// Every load is keyed by the resolved path, so asking for the same asset twice
/// returns the already-decoded value. Loading is therefore idempotent and safe
/// to call on every mode entry.
pub struct AssetCache {
    loader: AssetLoader,

    images: HashMap<AssetId, FrameImage>,

    maps: HashMap<AssetId, Arc<TileMap>>,
}

impl AssetCache {
    /// Create a new asset cache rooted at `asset_path`
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            images: HashMap::new(),
            maps: HashMap::new(),
        }
    }

    /// Load and decode an image, or return the cached copy
    pub fn load_image(&mut self, asset_type: AssetType, name: &str) -> Result<FrameImage, AssetError> {
        let path = self.loader.resolve_path(asset_type, name);
        let id = AssetId::from_path(&path);

        if let Some(image) = self.images.get(&id) {
            return Ok(Arc::clone(image));
        }

        let bytes = self.loader.load_bytes(asset_type, name)?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| AssetError::LoadError(format!("Failed to decode {}: {}", name, e)))?
            .to_rgba8();

        debug!(
            "Loaded image {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );

        let image = Arc::new(decoded);
        self.images.insert(id, Arc::clone(&image));
        Ok(image)
    }

    /// Load and parse a tile map, or return the cached copy
    pub fn load_map(&mut self, asset_type: AssetType, name: &str) -> Result<Arc<TileMap>, AssetError> {
        let id = AssetId::from_path(self.loader.resolve_path(asset_type, name));

        if let Some(map) = self.maps.get(&id) {
            return Ok(Arc::clone(map));
        }

        self.reload_map(asset_type, name)
    }

    /// Re-read a tile map from disk, replacing any cached copy
    pub fn reload_map(&mut self, asset_type: AssetType, name: &str) -> Result<Arc<TileMap>, AssetError> {
        let path = self.loader.resolve_path(asset_type, name);
        let text = self.loader.load_text(asset_type, name)?;
        let map = TileMap::parse(&text).map_err(|source| AssetError::Map {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        info!(
            "Loaded map {} ({}x{} tiles, {}x{} px)",
            path.display(),
            map.column_count(),
            map.row_count(),
            map.pixel_width(),
            map.pixel_height()
        );

        let map = Arc::new(map);
        self.maps.insert(AssetId::from_path(&path), Arc::clone(&map));
        Ok(map)
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            image_count: self.images.len(),
            map_count: self.maps.len(),
        }
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub image_count: usize,
    pub map_count: usize,
}
