use crate::error::AssetError;
use crate::rendering::asset_graph::nodes::texture_node::TextureAsset;
use crate::util::parallel::{ParConfig, par_map_pixels};

pub struct TextureImporter {}

impl TextureImporter {
    /// Converts the decoded pixels into tightly packed RGBA8, the only format that is uploaded. RGB pixels get an
    /// opaque alpha channel.
    pub fn expand_to_rgba8(texture: &TextureAsset, config: &ParConfig) -> Result<Vec<u8>, AssetError> {
        profiling::scope!("TextureImporter::expand_to_rgba8");
        let components = texture.components as usize;
        if components != 3 && components != 4 {
            return Err(AssetError::UnsupportedChannelLayout {
                path: texture.path.clone(),
                components: texture.components,
            });
        }

        let pixels = texture.width as usize * texture.height as usize;
        if texture.data.len() != pixels * components {
            return Err(AssetError::Malformed {
                path: texture.path.clone(),
                reason: format!(
                    "{}x{}x{} pixels need {} bytes, got {}",
                    texture.width,
                    texture.height,
                    components,
                    pixels * components,
                    texture.data.len()
                ),
            });
        }

        if components == 4 {
            return Ok(texture.data.clone());
        }

        let mut rgba = vec![0u8; pixels * 4];
        par_map_pixels(&texture.data, 3, &mut rgba, 4, config, |src, dst| {
            for (rgb, out) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
                out[..3].copy_from_slice(rgb);
                out[3] = u8::MAX;
            }
        });
        Ok(rgba)
    }
}
