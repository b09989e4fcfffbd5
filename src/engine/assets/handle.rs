// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Type-safe handle to an asset
///
/// The `T` parameter ensures handles can only be used with the correct asset type.
#[derive(Debug)]
pub struct AssetHandle<T> {
    id: AssetId,
    _phantom: PhantomData<T>,
}

impl<T> AssetHandle<T> {
    /// Handle for the asset stored at `path`
    pub fn from_path(path: &str) -> Self {
        Self {
            id: AssetId::from_path(path),
            _phantom: PhantomData,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Manual impls: derives would require `T: Clone` etc. on the marker types
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

/// Marker for sound clips
#[derive(Debug)]
pub struct SoundAsset;

pub type SoundHandle = AssetHandle<SoundAsset>;
