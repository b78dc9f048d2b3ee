use std::sync::Arc;

use crate::error::AssetError;
use crate::io::common::loader::RawAssetLoader;
use crate::rendering::asset_graph::asset_key::AssetKey;
use crate::rendering::asset_graph::nodes::texture_node::TextureAsset;
use crate::rendering::asset_graph::resolver::GraphNodeGenerator;
use crate::rendering::loader::texture_loader::TextureLoader;

pub struct TextureGenerator {
    loader: Arc<dyn RawAssetLoader>,
}

impl TextureGenerator {
    pub fn new(loader: Arc<dyn RawAssetLoader>) -> Self {
        Self { loader }
    }
}

impl GraphNodeGenerator<TextureAsset> for TextureGenerator {
    fn generate(&self, key: &AssetKey) -> Result<TextureAsset, AssetError> {
        TextureLoader::load(self.loader.as_ref(), key)
    }
}
