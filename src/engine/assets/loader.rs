// Resolving and reading asset files under the asset root

use super::AssetError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Kinds of asset, each kept in its own directory under the asset root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// Character frames
    Texture,
    Sound,
    /// Level tile maps, their tile images and the level background
    Map,
    /// Menu tile map and button images
    Menu,
}

impl AssetType {
    pub fn directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "textures",
            AssetType::Sound => "sounds",
            AssetType::Map => "maps",
            AssetType::Menu => "menu",
        }
    }
}

/// Reads raw asset files; decoding and caching live in `AssetCache`
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `<root>/<type directory>/<name>`
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.root.join(asset_type.directory()).join(name)
    }

    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(asset_type, name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AssetError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read a UTF-8 asset such as a map file
    pub fn load_text(&self, asset_type: AssetType, name: &str) -> Result<String, AssetError> {
        let bytes = self.load_bytes(asset_type, name)?;
        String::from_utf8(bytes)
            .map_err(|e| AssetError::LoadError(format!("{} is not valid UTF-8: {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_directories() {
        assert_eq!(AssetType::Texture.directory(), "textures");
        assert_eq!(AssetType::Sound.directory(), "sounds");
        assert_eq!(AssetType::Map.directory(), "maps");
        assert_eq!(AssetType::Menu.directory(), "menu");
    }

    #[test]
    fn test_resolve_path() {
        let loader = AssetLoader::new("/game/assets");
        assert_eq!(
            loader.resolve_path(AssetType::Map, "map.txt"),
            PathBuf::from("/game/assets/maps/map.txt")
        );
        assert_eq!(
            loader.resolve_path(AssetType::Texture, "mainChar/Jump/Dash2/teseter/DashAgain0.png"),
            PathBuf::from("/game/assets/textures/mainChar/Jump/Dash2/teseter/DashAgain0.png")
        );
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(dir.path());

        let err = loader.load_bytes(AssetType::Sound, "caw.wav").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_load_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("maps")).unwrap();
        std::fs::write(dir.path().join("maps/note.txt"), "hello").unwrap();

        let loader = AssetLoader::new(dir.path());
        assert_eq!(loader.load_text(AssetType::Map, "note.txt").unwrap(), "hello");
    }

    #[test]
    fn test_binary_text_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("maps")).unwrap();
        std::fs::write(dir.path().join("maps/bad.txt"), [0xff, 0xfe, 0x00]).unwrap();

        let loader = AssetLoader::new(dir.path());
        let err = loader.load_text(AssetType::Map, "bad.txt").unwrap_err();
        assert!(matches!(err, AssetError::LoadError(_)));
    }
}
