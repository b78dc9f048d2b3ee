use std::sync::Arc;

use crate::io::common::loader::RawAssetLoader;
use crate::rendering::asset_graph::model_generator::ModelGenerator;
use crate::rendering::asset_graph::nodes::model_node::ModelAsset;
use crate::rendering::asset_graph::resolver::{LoadStatus, Loaded, Resolver};
use crate::rendering::asset_graph::texture_store::TextureStore;

/// Decoded and flattened models by path. Every successful decode spawns the loading of the referenced textures
/// on the shared [`TextureStore`].
pub struct ModelStore {
    resolver: Resolver<ModelGenerator, ModelAsset>,
}

impl ModelStore {
    pub fn new(loader: Arc<dyn RawAssetLoader>, textures: Arc<TextureStore>) -> Self {
        Self {
            resolver: Resolver::new("model", ModelGenerator::new(loader, textures)),
        }
    }

    pub async fn prepare_model(&self, path: &str) -> Loaded<ModelAsset> {
        self.resolver.resolve(path).await
    }

    pub fn status(&self, path: &str) -> LoadStatus<ModelAsset> {
        self.resolver.status(path)
    }

    pub fn len(&self) -> usize {
        self.resolver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolver.is_empty()
    }
}
