use std::io::Cursor;

use bitflags::bitflags;
use emberfall_files_derive_parseable::Parse;

use crate::ParserError;
use crate::common::reader::{ContainerDecoder, read_magic, read_record, read_slice};
use crate::image::types::{Components, DecodedImage, pixel_bytes};

pub const FOURCC_TRUECOLOR: u32 = u32::from_le_bytes(*b"ETC1");

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TruecolorFlags: u8 {
        /// Pixels are stored as run-length packets.
        const RLE = 0b01;
        /// The first stored row is the bottom row of the image.
        const BOTTOM_UP = 0b10;
    }
}

#[derive(Debug, Parse)]
struct TruecolorHeader {
    width: u16,
    height: u16,
    components: u8,
    flags: u8,
}

/// Uncompressed BGR(A) pixels, optionally run-length encoded and/or stored bottom-up.
pub struct TruecolorReader {}

impl ContainerDecoder for TruecolorReader {
    type Asset = DecodedImage;
    const EXTENSION: &'static str = "etc";

    fn decode(buf: &[u8]) -> Result<DecodedImage, ParserError> {
        let mut rdr = Cursor::new(buf);
        read_magic(&mut rdr, FOURCC_TRUECOLOR)?;
        let header: TruecolorHeader = read_record(&mut rdr, "header")?;

        let components = Components::from_raw(header.components)?;
        let flags = TruecolorFlags::from_bits(header.flags)
            .ok_or_else(|| ParserError::format(format!("unknown flags {:#04x}", header.flags)))?;

        let stride = components.count();
        let total = pixel_bytes(header.width as u32, header.height as u32, stride)?;

        let mut data = if flags.contains(TruecolorFlags::RLE) {
            TruecolorReader::read_rle(&mut rdr, total, stride)?
        } else {
            read_slice(&mut rdr, total, "pixels")?.to_vec()
        };

        for px in data.chunks_exact_mut(stride) {
            px.swap(0, 2);
        }

        if flags.contains(TruecolorFlags::BOTTOM_UP) {
            TruecolorReader::flip_rows(&mut data, header.width as usize * stride);
        }

        Ok(DecodedImage {
            width: header.width as u32,
            height: header.height as u32,
            components: header.components,
            data,
        })
    }
}

impl TruecolorReader {
    fn read_rle(rdr: &mut Cursor<&[u8]>, total: usize, stride: usize) -> Result<Vec<u8>, ParserError> {
        let mut data = Vec::with_capacity(total);
        while data.len() < total {
            let packet = read_slice(rdr, 1, "rle packet header")?[0];
            let count = (packet & 0x7f) as usize + 1;
            if data.len() + count * stride > total {
                return Err(ParserError::format(format!(
                    "rle packet of {count} pixels overruns the image"
                )));
            }

            if packet & 0x80 != 0 {
                let pixel = read_slice(rdr, stride, "rle run")?;
                for _ in 0..count {
                    data.extend_from_slice(pixel);
                }
            } else {
                data.extend_from_slice(read_slice(rdr, count * stride, "rle literal")?);
            }
        }
        Ok(data)
    }

    fn flip_rows(data: &mut [u8], row_len: usize) {
        if row_len == 0 {
            return;
        }
        let rows = data.len() / row_len;
        for row in 0..rows / 2 {
            let (upper, lower) = data.split_at_mut((rows - 1 - row) * row_len);
            upper[row * row_len..(row + 1) * row_len].swap_with_slice(&mut lower[..row_len]);
        }
    }
}
