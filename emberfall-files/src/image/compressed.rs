use std::io::{Cursor, Read};

use emberfall_files_derive_parseable::Parse;
use flate2::read::ZlibDecoder;

use crate::ParserError;
use crate::common::reader::{ContainerDecoder, read_magic, read_record, read_slice};
use crate::image::types::{Components, DecodedImage, pixel_bytes};

pub const FOURCC_COMPRESSED: u32 = u32::from_le_bytes(*b"EZT1");

#[derive(Debug, Parse)]
struct CompressedHeader {
    width: u16,
    height: u16,
    components: u8,
    reserved: u8,
    compressed_len: u32,
}

/// RGB(A) pixels behind a zlib stream.
pub struct CompressedReader {}

impl ContainerDecoder for CompressedReader {
    type Asset = DecodedImage;
    const EXTENSION: &'static str = "ezt";

    fn decode(buf: &[u8]) -> Result<DecodedImage, ParserError> {
        let mut rdr = Cursor::new(buf);
        read_magic(&mut rdr, FOURCC_COMPRESSED)?;
        let header: CompressedHeader = read_record(&mut rdr, "header")?;

        let components = Components::from_raw(header.components)?;
        let expected = pixel_bytes(header.width as u32, header.height as u32, components.count())?;
        let payload = read_slice(&mut rdr, header.compressed_len as usize, "compressed payload")?;

        // One byte of slack so an oversized stream is detected without inflating all of it.
        let mut data = Vec::with_capacity(expected);
        ZlibDecoder::new(payload)
            .take(expected as u64 + 1)
            .read_to_end(&mut data)
            .map_err(|e| ParserError::format(format!("corrupt zlib stream: {e}")))?;

        if data.len() != expected {
            return Err(ParserError::format(format!(
                "payload inflated to {} bytes, expected {}",
                data.len(),
                expected
            )));
        }

        Ok(DecodedImage {
            width: header.width as u32,
            height: header.height as u32,
            components: header.components,
            data,
        })
    }
}
