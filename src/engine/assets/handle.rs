// Cache keys for loaded assets

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path};

/// Identifies an asset by its resolved path. `.` components are ignored,
/// so `maps/./map.txt` and `maps/map.txt` are the same asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(u64);

impl AssetId {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let mut hasher = DefaultHasher::new();
        path.as_ref()
            .components()
            .filter(|c| *c != Component::CurDir)
            .for_each(|c| c.hash(&mut hasher));
        Self(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_path_same_id() {
        assert_eq!(
            AssetId::from_path("textures/mainChar/Idle/BlueIdle3.png"),
            AssetId::from_path(Path::new("textures/mainChar/Idle/BlueIdle3.png"))
        );
        assert_ne!(
            AssetId::from_path("maps/map.txt"),
            AssetId::from_path("maps/map2.txt")
        );
    }

    #[test]
    fn test_current_dir_components_ignored() {
        assert_eq!(
            AssetId::from_path("assets/./maps/map.txt"),
            AssetId::from_path("assets/maps/map.txt")
        );
    }

    #[test]
    fn test_type_directory_is_part_of_id() {
        assert_ne!(
            AssetId::from_path("maps/background.png"),
            AssetId::from_path("textures/background.png")
        );
    }
}
