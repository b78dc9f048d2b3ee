use std::collections::HashMap;

use emberfall_files::mesh::types::Bone;

use crate::rendering::common::types::Mesh;

#[derive(Debug)]
pub struct SubMesh {
    /// As authored in the model file.
    pub texture_name: String,
    /// `texture_name` resolved against the model's directory, empty if the sub-mesh is untextured.
    pub texture_path: String,
    pub mesh: Mesh,
}

/// A decoded model whose sub-meshes have already been flattened into GPU-ready vertex and index lists. GPU buffers
/// are not part of the node, they live in the resource tables keyed by this node's allocation.
#[derive(Debug)]
pub struct ModelAsset {
    /// The path as requested (normalized separators), keeping any authored extension, e.g. `Object1/Tree01.emd`.
    pub path: String,
    pub name: String,
    pub bones: Vec<Bone>,
    pub sub_meshes: Vec<SubMesh>,
    /// lowercase authored texture name -> resolved texture path
    texture_paths: HashMap<String, String>,
}

impl ModelAsset {
    pub fn new(path: String, name: String, bones: Vec<Bone>, sub_meshes: Vec<SubMesh>) -> Self {
        let texture_paths = sub_meshes
            .iter()
            .filter(|sub_mesh| !sub_mesh.texture_name.is_empty())
            .map(|sub_mesh| (sub_mesh.texture_name.to_ascii_lowercase(), sub_mesh.texture_path.clone()))
            .collect();

        Self {
            path,
            name,
            bones,
            sub_meshes,
            texture_paths,
        }
    }

    /// The path a sub-mesh's texture reference has been resolved to. The lookup ignores ASCII case.
    pub fn texture_path_for_mesh(&self, texture_name: &str) -> Option<&str> {
        self.texture_paths
            .get(&texture_name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Every distinct texture this model references.
    pub fn texture_paths(&self) -> impl Iterator<Item = &str> {
        self.texture_paths.values().map(String::as_str)
    }
}
