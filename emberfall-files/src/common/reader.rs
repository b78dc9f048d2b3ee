use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;

pub trait Parseable<T> {
    fn parse<R: Read>(rdr: &mut R) -> Result<T, ParserError>;
}

/// The number of bytes a record occupies on disk. Used to validate declared element counts against the
/// available bytes _before_ reading them.
pub trait EncodedSize {
    const ENCODED_SIZE: usize;
}

/// One binary container kind: validates the signature and the declared sizes, then decodes the payload.
pub trait ContainerDecoder {
    type Asset;

    /// Canonical file extension of this container (lowercase, without the dot).
    const EXTENSION: &'static str;

    fn decode(buf: &[u8]) -> Result<Self::Asset, ParserError>;
}

macro_rules! parseable_primitive {
    ($ty:ty, $size:expr, $read:expr) => {
        impl Parseable<$ty> for $ty {
            fn parse<R: Read>(rdr: &mut R) -> Result<$ty, ParserError> {
                Ok(($read)(rdr)?)
            }
        }

        impl EncodedSize for $ty {
            const ENCODED_SIZE: usize = $size;
        }
    };
}

parseable_primitive!(u8, 1, |rdr: &mut R| rdr.read_u8());
parseable_primitive!(i8, 1, |rdr: &mut R| rdr.read_i8());
parseable_primitive!(u16, 2, |rdr: &mut R| rdr.read_u16::<LittleEndian>());
parseable_primitive!(i16, 2, |rdr: &mut R| rdr.read_i16::<LittleEndian>());
parseable_primitive!(u32, 4, |rdr: &mut R| rdr.read_u32::<LittleEndian>());
parseable_primitive!(i32, 4, |rdr: &mut R| rdr.read_i32::<LittleEndian>());
parseable_primitive!(f32, 4, |rdr: &mut R| rdr.read_f32::<LittleEndian>());

impl<T: Parseable<T> + Default + Copy, const N: usize> Parseable<[T; N]> for [T; N] {
    fn parse<R: Read>(rdr: &mut R) -> Result<[T; N], ParserError> {
        let mut array = [T::default(); N];
        for element in array.iter_mut() {
            *element = T::parse(rdr)?;
        }
        Ok(array)
    }
}

impl<T: EncodedSize, const N: usize> EncodedSize for [T; N] {
    const ENCODED_SIZE: usize = T::ENCODED_SIZE * N;
}

pub(crate) fn remaining(rdr: &Cursor<&[u8]>) -> usize {
    let len = rdr.get_ref().len();
    len.saturating_sub(rdr.position() as usize)
}

pub(crate) fn ensure_remaining(rdr: &Cursor<&[u8]>, needed: usize, section: &'static str) -> Result<(), ParserError> {
    let available = remaining(rdr);
    if needed > available {
        return Err(ParserError::Truncated {
            section,
            needed,
            available,
        });
    }
    Ok(())
}

/// Reads a single record after checking that it fits into the remaining buffer.
pub(crate) fn read_record<T: Parseable<T> + EncodedSize>(
    rdr: &mut Cursor<&[u8]>,
    section: &'static str,
) -> Result<T, ParserError> {
    ensure_remaining(rdr, T::ENCODED_SIZE, section)?;
    T::parse(rdr)
}

/// Reads `count` consecutive records after checking that all of them fit into the remaining buffer.
pub(crate) fn read_records<T: Parseable<T> + EncodedSize>(
    rdr: &mut Cursor<&[u8]>,
    count: usize,
    section: &'static str,
) -> Result<Vec<T>, ParserError> {
    let needed = count.checked_mul(T::ENCODED_SIZE).unwrap_or(usize::MAX);
    ensure_remaining(rdr, needed, section)?;

    let mut list = Vec::with_capacity(count);
    for _ in 0..count {
        list.push(T::parse(rdr)?);
    }
    Ok(list)
}

/// Borrows the next `len` bytes of the buffer and advances the cursor past them.
pub(crate) fn read_slice<'a>(
    rdr: &mut Cursor<&'a [u8]>,
    len: usize,
    section: &'static str,
) -> Result<&'a [u8], ParserError> {
    ensure_remaining(rdr, len, section)?;
    let start = rdr.position() as usize;
    let buf: &'a [u8] = *rdr.get_ref();
    rdr.set_position((start + len) as u64);
    Ok(&buf[start..start + len])
}

pub(crate) fn read_magic(rdr: &mut Cursor<&[u8]>, expected: u32) -> Result<u32, ParserError> {
    ensure_remaining(rdr, 4, "signature")?;
    let magic = rdr.read_u32::<LittleEndian>()?;
    if magic != expected {
        return Err(ParserError::InvalidMagicValue { magic });
    }
    Ok(magic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::FixedName;

    #[test]
    fn truncated_records_are_rejected_before_reading() {
        let buf = [1u8, 0, 2, 0, 3];
        let mut rdr = Cursor::new(&buf[..]);
        let err = read_records::<u16>(&mut rdr, 3, "indices").unwrap_err();
        match err {
            ParserError::Truncated {
                section,
                needed,
                available,
            } => {
                assert_eq!(section, "indices");
                assert_eq!(needed, 6);
                assert_eq!(available, 5);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(rdr.position(), 0);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let buf = [0u8; 4];
        let mut rdr = Cursor::new(&buf[..]);
        assert!(read_records::<u32>(&mut rdr, usize::MAX, "faces").is_err());
    }

    #[test]
    fn fixed_names_stop_at_nul() -> Result<(), anyhow::Error> {
        let mut raw = [0u8; 32];
        raw[..6].copy_from_slice(b"Leaf01");
        raw[7] = b'x';
        let mut rdr = Cursor::new(&raw[..]);
        let name: FixedName = read_record(&mut rdr, "name")?;
        assert_eq!(name.to_string_lossy(), "Leaf01");
        Ok(())
    }

    #[test]
    fn slices_borrow_from_the_buffer() -> Result<(), anyhow::Error> {
        let buf = [9u8, 8, 7, 6];
        let mut rdr = Cursor::new(&buf[..]);
        rdr.set_position(1);
        assert_eq!(read_slice(&mut rdr, 2, "payload")?, &[8, 7]);
        assert_eq!(remaining(&rdr), 1);
        Ok(())
    }
}
