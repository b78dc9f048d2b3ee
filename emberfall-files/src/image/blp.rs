use image_blp::convert::blp_to_image;
use image_blp::parser::parse_blp_with_externals;

use crate::ParserError;
use crate::common::reader::ContainerDecoder;
use crate::image::types::DecodedImage;

const FOURCC_BLP0: u32 = u32::from_le_bytes(*b"BLP0");
const FOURCC_BLP1: u32 = u32::from_le_bytes(*b"BLP1");
const FOURCC_BLP2: u32 = u32::from_le_bytes(*b"BLP2");

/// BLP textures (paletted, raw and DXT compressed), decoded through image-blp into RGBA.
pub struct BlpReader {}

impl ContainerDecoder for BlpReader {
    type Asset = DecodedImage;
    const EXTENSION: &'static str = "blp";

    fn decode(buf: &[u8]) -> Result<DecodedImage, ParserError> {
        if buf.len() < 4 {
            return Err(ParserError::Truncated {
                section: "signature",
                needed: 4,
                available: buf.len(),
            });
        }

        let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        match magic {
            FOURCC_BLP1 | FOURCC_BLP2 => {}
            // BLP0 keeps its mip maps in sibling files; we only ever decode a single buffer.
            FOURCC_BLP0 => {
                return Err(ParserError::Unsupported {
                    variant: "BLP0 (external mip maps)",
                });
            }
            magic => return Err(ParserError::InvalidMagicValue { magic }),
        }

        let image = parse_blp_with_externals(buf, |_i| {
            unreachable!("Only BLP0 references external mip maps")
        })
        .map_err(|e| ParserError::Foreign(format!("Parsing of the BLP failed: {}", e)))?
        .1;

        let rgba = blp_to_image(&image, 0)
            .map_err(|e| ParserError::Foreign(format!("Converting the BLP failed: {:?}", e)))?
            .into_rgba8();

        Ok(DecodedImage {
            width: rgba.width(),
            height: rgba.height(),
            components: 4,
            data: rgba.into_raw(),
        })
    }
}
