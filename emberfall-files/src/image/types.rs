use num_enum::TryFromPrimitive;

use crate::ParserError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Components {
    Rgb = 3,
    Rgba = 4,
}

impl Components {
    pub(crate) fn from_raw(raw: u8) -> Result<Components, ParserError> {
        Components::try_from(raw).map_err(|_| ParserError::format(format!("{raw} color components per pixel")))
    }

    pub fn count(self) -> usize {
        self as usize
    }
}

/// Row-major, top row first, channels interleaved in RGB(A) order.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DecodedImage {{ {}x{}x{}, data: [{}] }}",
            self.width,
            self.height,
            self.components,
            self.data.len()
        )
    }
}

/// `width * height * components`, rejecting dimensions that can't be addressed.
pub(crate) fn pixel_bytes(width: u32, height: u32, components: usize) -> Result<usize, ParserError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(components))
        .ok_or_else(|| ParserError::format(format!("{width}x{height} image is too large")))
}
