use emberfall_files::common::reader::ContainerDecoder;
use emberfall_files::mesh::reader::MeshReader;
use emberfall_files::mesh::types::MeshAsset;
use itertools::Itertools;
use log::trace;

use crate::error::AssetError;
use crate::io::common::loader::RawAssetLoader;
use crate::rendering::asset_graph::asset_key::AssetKey;
use crate::rendering::asset_graph::nodes::model_node::{ModelAsset, SubMesh};
use crate::rendering::importer::mesh_importer::MeshImporter;
use crate::rendering::loader::formats::MESH_EXTENSIONS;

pub struct ModelLoader {}

impl ModelLoader {
    /// Only locates and parses the mesh container, e.g. for tooling that wants the indexed streams.
    pub fn load_mesh(loader: &dyn RawAssetLoader, key: &AssetKey) -> Result<MeshAsset, AssetError> {
        let path = loader.locate(key.requested(), MESH_EXTENSIONS)?;
        let buf = loader.load_raw_owned(&path)?;
        MeshReader::decode(&buf).map_err(|err| AssetError::from_parser(key.requested(), err))
    }

    /// Parses the model and flattens every sub-mesh. Texture references are resolved against the model's
    /// directory, but not loaded.
    pub fn load(loader: &dyn RawAssetLoader, key: &AssetKey) -> Result<ModelAsset, AssetError> {
        profiling::scope!("ModelLoader::load");
        let mesh = Self::load_mesh(loader, key)?;
        trace!(
            "Decoded {key}: {} sub meshes, {} bones",
            mesh.sub_meshes.len(),
            mesh.bones.len()
        );

        let sub_meshes = mesh
            .sub_meshes
            .iter()
            .map(|section| SubMesh {
                texture_path: match section.texture_name.as_str() {
                    "" => String::new(),
                    name => key.sibling(name).requested().to_string(),
                },
                texture_name: section.texture_name.clone(),
                mesh: MeshImporter::create_mesh(section),
            })
            .collect_vec();

        Ok(ModelAsset::new(
            key.requested().to_string(),
            mesh.name,
            mesh.bones,
            sub_meshes,
        ))
    }
}
