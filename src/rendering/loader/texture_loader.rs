use itertools::Itertools;
use log::trace;

use crate::error::AssetError;
use crate::io::common::loader::RawAssetLoader;
use crate::rendering::asset_graph::asset_key::AssetKey;
use crate::rendering::asset_graph::nodes::texture_node::TextureAsset;
use crate::rendering::loader::formats;

pub struct TextureLoader {}

impl TextureLoader {
    pub fn load(loader: &dyn RawAssetLoader, key: &AssetKey) -> Result<TextureAsset, AssetError> {
        profiling::scope!("TextureLoader::load");
        let extensions = formats::image_candidates(key.requested())
            .iter()
            .map(|format| format.extension)
            .collect_vec();

        let path = loader.locate(key.requested(), &extensions)?;
        let format = formats::image_format_for_file(&path).ok_or_else(|| AssetError::Malformed {
            path: path.to_string_lossy().to_string(),
            reason: "no image container is registered for this extension".to_string(),
        })?;

        let buf = loader.load_raw_owned(&path)?;
        let image = (format.decode)(&buf).map_err(|err| AssetError::from_parser(key.requested(), err))?;
        trace!("Decoded {key} as {:?} from {}: {:?}", format.container, path.display(), image);

        Ok(TextureAsset::from_image(key.requested(), image))
    }
}
