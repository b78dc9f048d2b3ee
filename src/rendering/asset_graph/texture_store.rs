use std::sync::Arc;

use crate::io::common::loader::RawAssetLoader;
use crate::rendering::asset_graph::asset_key::AssetKey;
use crate::rendering::asset_graph::nodes::texture_node::TextureAsset;
use crate::rendering::asset_graph::resolver::{LoadStatus, Loaded, Resolver};
use crate::rendering::asset_graph::texture_generator::TextureGenerator;
use crate::rendering::common::script_metadata::ScriptMetadata;

/// Decoded textures by path. Uploading is a separate step that only the render thread takes, see
/// [`crate::rendering::gpu::resource_tables::GpuResourceTables::gpu_texture`].
pub struct TextureStore {
    resolver: Resolver<TextureGenerator, TextureAsset>,
}

impl TextureStore {
    pub fn new(loader: Arc<dyn RawAssetLoader>) -> Self {
        Self {
            resolver: Resolver::new("texture", TextureGenerator::new(loader)),
        }
    }

    pub async fn prepare_texture(&self, path: &str) -> Loaded<TextureAsset> {
        self.resolver.resolve(path).await
    }

    /// Fire and forget, the texture is decoded in the background. Skipped outside of a tokio runtime.
    pub fn prefetch_texture(&self, path: &str) {
        self.resolver.prefetch(path);
    }

    pub fn status(&self, path: &str) -> LoadStatus<TextureAsset> {
        self.resolver.status(path)
    }

    pub fn status_key(&self, key: &AssetKey) -> LoadStatus<TextureAsset> {
        self.resolver.status_key(key)
    }

    /// Only known once the texture has been decoded successfully.
    pub fn script_metadata(&self, path: &str) -> Option<ScriptMetadata> {
        match self.status(path) {
            LoadStatus::Ready(texture) => texture.script,
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.resolver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolver.is_empty()
    }
}
