use std::sync::{Arc, OnceLock};

use dashmap::{DashMap, DashSet};
use log::{debug, error, trace, warn};

use crate::error::AssetError;
use crate::rendering::asset_graph::asset_key::AssetKey;
use crate::rendering::asset_graph::nodes::model_node::{ModelAsset, SubMesh};
use crate::rendering::asset_graph::nodes::texture_node::TextureAsset;
use crate::rendering::asset_graph::resolver::LoadStatus;
use crate::rendering::asset_graph::texture_store::TextureStore;
use crate::rendering::gpu::GpuDevice;
use crate::rendering::importer::texture_importer::TextureImporter;
use crate::util::parallel::ParConfig;
use crate::util::weak_dashmap::WeakKeyDashMap;

pub struct SubMeshBuffers<D: GpuDevice> {
    pub vertex_buffer: Arc<D::VertexBuffer>,
    pub index_buffer: Arc<D::IndexBuffer>,
    pub index_count: u32,
}

/// One slot per sub-mesh, `None` where nothing could be uploaded (e.g. no faces).
type ModelBuffers<D> = Vec<Option<SubMeshBuffers<D>>>;

/// `None` caches a miss.
type TextureSlot<D> = Arc<OnceLock<Option<Arc<<D as GpuDevice>::Texture>>>>;

/// Maps decoded assets to their GPU objects. Every object is created at most once: the slot of a key is inserted
/// under the shard lock, the upload itself runs outside of it through the slot's [`OnceLock`].
/// Only the thread owning the graphics context should call into this.
pub struct GpuResourceTables<D: GpuDevice> {
    device: D,
    /// keyed by the model allocation, so the buffers go away with the last reference to the model
    model_buffers: WeakKeyDashMap<ModelAsset, Arc<OnceLock<ModelBuffers<D>>>>,
    textures: DashMap<AssetKey, TextureSlot<D>>,
    unrequested_logged: DashSet<AssetKey>,
    expansion: ParConfig,
}

impl<D: GpuDevice> GpuResourceTables<D> {
    pub fn new(device: D, expansion: ParConfig) -> Self {
        Self {
            device,
            model_buffers: WeakKeyDashMap::new(),
            textures: DashMap::new(),
            unrequested_logged: DashSet::new(),
            expansion,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Creates the vertex and index buffers of every sub-mesh, unless that already happened for this model.
    pub fn upload_model(&self, asset: &Arc<ModelAsset>) {
        let slot = self
            .model_buffers
            .get_or_insert_with(asset, || Arc::new(OnceLock::new()));
        slot.get_or_init(|| self.create_model_buffers(asset));
    }

    fn create_model_buffers(&self, asset: &ModelAsset) -> ModelBuffers<D> {
        profiling::scope!("GpuResourceTables::create_model_buffers");
        trace!(
            "Uploading {} sub meshes of {} to {}",
            asset.sub_meshes.len(),
            asset.path,
            self.device.backend_name()
        );

        asset
            .sub_meshes
            .iter()
            .enumerate()
            .map(|(index, sub_mesh)| self.create_sub_mesh_buffers(asset, index, sub_mesh))
            .collect()
    }

    fn create_sub_mesh_buffers(&self, asset: &ModelAsset, index: usize, sub_mesh: &SubMesh) -> Option<SubMeshBuffers<D>> {
        if sub_mesh.mesh.indices.is_empty() {
            debug!("Sub mesh {index} of {} has no faces, nothing to upload", asset.path);
            return None;
        }

        let label = format!("{}#{index}", asset.path);
        let vertex_buffer = self
            .device
            .create_vertex_buffer(&label, &sub_mesh.mesh.vertices)
            .inspect_err(|err| error!("Creating the vertex buffer failed: {err}"))
            .ok()?;
        let index_buffer = self
            .device
            .create_index_buffer(&label, &sub_mesh.mesh.indices)
            .inspect_err(|err| error!("Creating the index buffer failed: {err}"))
            .ok()?;

        Some(SubMeshBuffers {
            vertex_buffer: Arc::new(vertex_buffer),
            index_buffer: Arc::new(index_buffer),
            index_count: sub_mesh.mesh.indices.len() as u32,
        })
    }

    fn sub_mesh_buffers<R>(
        &self,
        asset: &Arc<ModelAsset>,
        sub_mesh: usize,
        f: impl FnOnce(&SubMeshBuffers<D>) -> R,
    ) -> Option<R> {
        let slot = self.model_buffers.get(asset)?;
        slot.get()?.get(sub_mesh)?.as_ref().map(f)
    }

    /// `None` if the model hasn't been uploaded or the sub-mesh has no buffers.
    pub fn vertex_buffer(&self, asset: &Arc<ModelAsset>, sub_mesh: usize) -> Option<Arc<D::VertexBuffer>> {
        self.sub_mesh_buffers(asset, sub_mesh, |buffers| buffers.vertex_buffer.clone())
    }

    pub fn index_buffer(&self, asset: &Arc<ModelAsset>, sub_mesh: usize) -> Option<Arc<D::IndexBuffer>> {
        self.sub_mesh_buffers(asset, sub_mesh, |buffers| buffers.index_buffer.clone())
    }

    pub fn index_count(&self, asset: &Arc<ModelAsset>, sub_mesh: usize) -> Option<u32> {
        self.sub_mesh_buffers(asset, sub_mesh, |buffers| buffers.index_count)
    }

    /// The texture of `path` on the device, materialized on first access. Returns `None` while the texture is
    /// still loading (without caching anything) and for textures that are missing or unusable (cached, logged
    /// once).
    pub fn gpu_texture(&self, textures: &TextureStore, path: &str) -> Option<Arc<D::Texture>> {
        let key = AssetKey::new(path);
        if let Some(cached) = self.textures.get(&key).and_then(|slot| slot.value().get().cloned()) {
            return cached;
        }

        let texture = match textures.status_key(&key) {
            LoadStatus::NotRequested => {
                if self.unrequested_logged.insert(key.clone()) {
                    warn!("Texture {key} has never been prepared, it can't be materialized");
                }
                return None;
            }
            LoadStatus::Loading => return None,
            LoadStatus::Ready(texture) => Some(texture),
            // the texture store already logged why
            LoadStatus::Failed(_) => None,
        };

        let slot = self
            .textures
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceLock::new()))
            .value()
            .clone();

        let handle = slot
            .get_or_init(|| match texture {
                Some(texture) => self.materialize(&key, &texture),
                None => {
                    debug!("No pixel data for texture {key}, skipping the upload");
                    None
                }
            })
            .clone();

        // settled slots answer all further lookups, the key can't reach the never-prepared branch again
        self.unrequested_logged.remove(&key);
        handle
    }

    fn materialize(&self, key: &AssetKey, texture: &TextureAsset) -> Option<Arc<D::Texture>> {
        profiling::scope!("GpuResourceTables::materialize");
        if texture.width == 0 || texture.height == 0 {
            warn!("Texture {key} is {}x{}, nothing to upload", texture.width, texture.height);
            return None;
        }

        let rgba = TextureImporter::expand_to_rgba8(texture, &self.expansion)
            .inspect_err(|err: &AssetError| warn!("Skipping the upload of {key}: {err}"))
            .ok()?;

        let handle = self
            .device
            .create_texture_rgba8(key.requested(), texture.width, texture.height, &rgba)
            .inspect_err(|err| error!("Creating the texture failed: {err}"))
            .ok()?;

        trace!("Materialized {key} ({}x{})", texture.width, texture.height);
        Some(Arc::new(handle))
    }

    /// Number of texture keys that have a settled slot, uploaded or missed.
    pub fn cached_textures(&self) -> usize {
        self.textures.iter().filter(|slot| slot.value().get().is_some()).count()
    }

    pub fn uploaded_models(&self) -> usize {
        self.model_buffers.len()
    }
}
