use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;
use crate::common::reader::{EncodedSize, Parseable};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct C3Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct C2Vector {
    pub x: f32,
    pub y: f32,
}

impl Parseable<C3Vector> for C3Vector {
    fn parse<R: Read>(rdr: &mut R) -> Result<C3Vector, ParserError> {
        Ok(C3Vector {
            x: rdr.read_f32::<LittleEndian>()?,
            y: rdr.read_f32::<LittleEndian>()?,
            z: rdr.read_f32::<LittleEndian>()?,
        })
    }
}

impl EncodedSize for C3Vector {
    const ENCODED_SIZE: usize = 12;
}

impl Parseable<C2Vector> for C2Vector {
    fn parse<R: Read>(rdr: &mut R) -> Result<C2Vector, ParserError> {
        Ok(C2Vector {
            x: rdr.read_f32::<LittleEndian>()?,
            y: rdr.read_f32::<LittleEndian>()?,
        })
    }
}

impl EncodedSize for C2Vector {
    const ENCODED_SIZE: usize = 8;
}

/// A name stored as a NUL padded, fixed size byte array.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedName(pub [u8; 32]);

impl Default for FixedName {
    fn default() -> Self {
        FixedName([0; 32])
    }
}

impl FixedName {
    /// Everything up to the first NUL byte. Legacy content is not guaranteed to be UTF-8, so this is lossy.
    pub fn to_string_lossy(&self) -> String {
        let end = self.0.iter().position(|&c| c == 0).unwrap_or(self.0.len());
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl Parseable<FixedName> for FixedName {
    fn parse<R: Read>(rdr: &mut R) -> Result<FixedName, ParserError> {
        Ok(FixedName(<[u8; 32]>::parse(rdr)?))
    }
}

impl EncodedSize for FixedName {
    const ENCODED_SIZE: usize = 32;
}
