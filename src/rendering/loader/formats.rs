//! Static registration of the containers per asset kind. The extension that the path resolver finds on disk picks
//! the decoder, extensions authored into the content (`Leaf01.tga`) only narrow down the candidates.
use std::path::Path;

use emberfall_files::ParserError;
use emberfall_files::common::reader::ContainerDecoder;
use emberfall_files::image::DecodedImage;
use emberfall_files::image::blp::BlpReader;
use emberfall_files::image::compressed::CompressedReader;
use emberfall_files::image::paletted::PalettedReader;
use emberfall_files::image::truecolor::TruecolorReader;
use emberfall_files::mesh::reader::MeshReader;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageContainer {
    Paletted,
    Truecolor,
    Compressed,
    Blp,
}

pub struct ImageFormat {
    pub container: ImageContainer,
    /// Canonical extension on disk.
    pub extension: &'static str,
    /// Extensions that the content authoring tools wrote into references to this container.
    pub authored_aliases: &'static [&'static str],
    pub decode: fn(&[u8]) -> Result<DecodedImage, ParserError>,
}

pub static IMAGE_FORMATS: [ImageFormat; 4] = [
    ImageFormat {
        container: ImageContainer::Paletted,
        extension: PalettedReader::EXTENSION,
        authored_aliases: &["bmp"],
        decode: <PalettedReader as ContainerDecoder>::decode,
    },
    ImageFormat {
        container: ImageContainer::Truecolor,
        extension: TruecolorReader::EXTENSION,
        authored_aliases: &["tga"],
        decode: <TruecolorReader as ContainerDecoder>::decode,
    },
    ImageFormat {
        container: ImageContainer::Compressed,
        extension: CompressedReader::EXTENSION,
        authored_aliases: &["jpg", "jpeg"],
        decode: <CompressedReader as ContainerDecoder>::decode,
    },
    ImageFormat {
        container: ImageContainer::Blp,
        extension: BlpReader::EXTENSION,
        authored_aliases: &[],
        decode: <BlpReader as ContainerDecoder>::decode,
    },
];

pub const MESH_EXTENSIONS: &[&str] = &[MeshReader::EXTENSION];

fn extension_of(path: &str) -> Option<String> {
    let file = path.rsplit(['/', '\\']).next()?;
    let (stem, ext) = file.rsplit_once('.')?;
    (!stem.is_empty()).then(|| ext.to_ascii_lowercase())
}

/// The image formats to look for, in order. A known authored or canonical extension moves its container to the
/// front, the others are still tried afterwards as the content isn't always consistent.
pub fn image_candidates(logical_path: &str) -> Vec<&'static ImageFormat> {
    let pinned = extension_of(logical_path).and_then(|ext| {
        IMAGE_FORMATS
            .iter()
            .position(|format| format.extension == ext || format.authored_aliases.contains(&ext.as_str()))
    });

    let mut candidates: Vec<&'static ImageFormat> = IMAGE_FORMATS.iter().collect();
    if let Some(index) = pinned {
        let format = candidates.remove(index);
        candidates.insert(0, format);
    }
    candidates
}

/// The format of a file that the path resolver located, by its canonical extension.
pub fn image_format_for_file(path: &Path) -> Option<&'static ImageFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_FORMATS.iter().find(|format| format.extension == ext)
}
