use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Access to the raw bytes of the asset files. The loaders on top of it pick the decoder, so locating a file
/// is a separate step from reading it: the extension that has been found decides on the container.
pub trait RawAssetLoader: Send + Sync {
    /// Finds the file behind a logical path, trying the candidate extensions (lowercase, without the dot) in
    /// order. Fails with [`AssetError::NotFound`] when none of them exists.
    fn locate(&self, logical_path: &str, extensions: &[&str]) -> Result<PathBuf, AssetError>;

    fn load_raw_owned(&self, path: &Path) -> Result<Vec<u8>, AssetError>;
}
