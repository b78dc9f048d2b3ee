use std::sync::Arc;

use crate::io::common::loader::RawAssetLoader;
use crate::io::fs::loader::FsLoader;
use crate::rendering::asset_graph::model_store::ModelStore;
use crate::rendering::asset_graph::nodes::model_node::ModelAsset;
use crate::rendering::asset_graph::nodes::texture_node::TextureAsset;
use crate::rendering::asset_graph::resolver::Loaded;
use crate::rendering::asset_graph::texture_store::TextureStore;
use crate::rendering::common::script_metadata::ScriptMetadata;
use crate::rendering::gpu::GpuDevice;
use crate::rendering::gpu::resource_tables::GpuResourceTables;
use crate::settings::AssetConfig;
use crate::util::parallel::ParConfig;

/// Owns the stores of one asset root. Several managers (e.g. for different data directories) can coexist, each
/// with its own caches.
pub struct AssetManager {
    config: AssetConfig,
    loader: Arc<dyn RawAssetLoader>,
    textures: Arc<TextureStore>,
    models: ModelStore,
}

impl AssetManager {
    pub fn new(config: AssetConfig) -> Self {
        let loader = Arc::new(FsLoader::new(&config));
        Self::with_loader(config, loader)
    }

    pub fn with_loader(config: AssetConfig, loader: Arc<dyn RawAssetLoader>) -> Self {
        let textures = Arc::new(TextureStore::new(loader.clone()));
        let models = ModelStore::new(loader.clone(), textures.clone());
        Self {
            config,
            loader,
            textures,
            models,
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    pub fn loader(&self) -> &Arc<dyn RawAssetLoader> {
        &self.loader
    }

    pub fn models(&self) -> &ModelStore {
        &self.models
    }

    pub fn textures(&self) -> &Arc<TextureStore> {
        &self.textures
    }

    pub async fn prepare_model(&self, path: &str) -> Loaded<ModelAsset> {
        self.models.prepare_model(path).await
    }

    pub async fn prepare_texture(&self, path: &str) -> Loaded<TextureAsset> {
        self.textures.prepare_texture(path).await
    }

    pub fn script_metadata(&self, path: &str) -> Option<ScriptMetadata> {
        self.textures.script_metadata(path)
    }

    /// GPU objects for the assets of this manager, created on `device`.
    pub fn gpu_tables<D: GpuDevice>(&self, device: D) -> GpuResourceTables<D> {
        GpuResourceTables::new(device, ParConfig::with_threads(self.config.expansion_threads))
    }
}
