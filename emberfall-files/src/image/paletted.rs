use std::io::Cursor;

use emberfall_files_derive_parseable::Parse;

use crate::ParserError;
use crate::common::reader::{ContainerDecoder, read_magic, read_record, read_slice};
use crate::image::types::{Components, DecodedImage, pixel_bytes};

pub const FOURCC_PALETTED: u32 = u32::from_le_bytes(*b"EPX8");
pub const MAX_PALETTE_LEN: u16 = 256;

#[derive(Debug, Parse)]
struct PalettedHeader {
    width: u16,
    height: u16,
    palette_len: u16,
    /// bytes per palette entry, which is also the channel count of the decoded image
    palette_stride: u8,
    reserved: u8,
}

/// 8-bit indexed color with an RGB or RGBA palette of up to 256 entries.
pub struct PalettedReader {}

impl ContainerDecoder for PalettedReader {
    type Asset = DecodedImage;
    const EXTENSION: &'static str = "epx";

    fn decode(buf: &[u8]) -> Result<DecodedImage, ParserError> {
        let mut rdr = Cursor::new(buf);
        read_magic(&mut rdr, FOURCC_PALETTED)?;
        let header: PalettedHeader = read_record(&mut rdr, "header")?;

        let components = Components::from_raw(header.palette_stride)?;
        let stride = components.count();
        if header.palette_len == 0 || header.palette_len > MAX_PALETTE_LEN {
            return Err(ParserError::format(format!(
                "palette with {} entries",
                header.palette_len
            )));
        }

        let palette = read_slice(&mut rdr, header.palette_len as usize * stride, "palette")?;
        let pixel_count = pixel_bytes(header.width as u32, header.height as u32, 1)?;
        let indices = read_slice(&mut rdr, pixel_count, "pixel indices")?;

        let mut data = Vec::with_capacity(pixel_count * stride);
        for &index in indices {
            if index as u16 >= header.palette_len {
                return Err(ParserError::format(format!(
                    "palette index {} is out of range ({} entries)",
                    index, header.palette_len
                )));
            }
            let start = index as usize * stride;
            data.extend_from_slice(&palette[start..start + stride]);
        }

        Ok(DecodedImage {
            width: header.width as u32,
            height: header.height as u32,
            components: header.palette_stride,
            data,
        })
    }
}
