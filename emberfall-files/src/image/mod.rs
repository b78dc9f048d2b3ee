//! Image containers. Every variant decodes into the same [`DecodedImage`] shape, regardless of whether the
//! source was paletted, raw, run-length encoded or compressed.
pub mod blp;
pub mod compressed;
pub mod paletted;
pub mod truecolor;
pub mod types;

pub use types::{Components, DecodedImage};
