use std::sync::Arc;

use log::trace;

use crate::error::AssetError;
use crate::io::common::loader::RawAssetLoader;
use crate::rendering::asset_graph::asset_key::AssetKey;
use crate::rendering::asset_graph::nodes::model_node::ModelAsset;
use crate::rendering::asset_graph::resolver::GraphNodeGenerator;
use crate::rendering::asset_graph::texture_store::TextureStore;
use crate::rendering::loader::model_loader::ModelLoader;

pub struct ModelGenerator {
    loader: Arc<dyn RawAssetLoader>,
    textures: Arc<TextureStore>,
}

impl ModelGenerator {
    pub fn new(loader: Arc<dyn RawAssetLoader>, textures: Arc<TextureStore>) -> Self {
        Self { loader, textures }
    }

    /// The texture store deduplicates, so models sharing a texture only decode it once. Failures are logged and
    /// cached by the texture store itself.
    fn prefetch_textures(&self, model: &ModelAsset) {
        for path in model.texture_paths() {
            trace!("Prefetching {path} for {}", model.path);
            self.textures.prefetch_texture(path);
        }
    }
}

impl GraphNodeGenerator<ModelAsset> for ModelGenerator {
    fn generate(&self, key: &AssetKey) -> Result<ModelAsset, AssetError> {
        let model = ModelLoader::load(self.loader.as_ref(), key)?;
        self.prefetch_textures(&model);
        Ok(model)
    }
}
