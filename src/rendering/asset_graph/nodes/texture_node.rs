use std::fmt::{Debug, Formatter};

use emberfall_files::image::DecodedImage;

use crate::rendering::common::script_metadata::ScriptMetadata;

/// The decoded pixel buffer. Uploading it is up to the render thread, see
/// [`crate::rendering::gpu::resource_tables::GpuResourceTables::gpu_texture`].
pub struct TextureAsset {
    pub path: String,
    pub width: u32,
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA)
    pub components: u8,
    /// Row-major, top row first.
    pub data: Vec<u8>,
    pub script: Option<ScriptMetadata>,
}

impl TextureAsset {
    pub fn from_image(path: &str, image: DecodedImage) -> Self {
        Self {
            path: path.to_string(),
            width: image.width,
            height: image.height,
            components: image.components,
            data: image.data,
            script: ScriptMetadata::from_path(path),
        }
    }
}

impl Debug for TextureAsset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TextureAsset {{ {}, {}x{}x{}, data: [{}], script: {:?} }}",
            self.path,
            self.width,
            self.height,
            self.components,
            self.data.len(),
            self.script
        )
    }
}
