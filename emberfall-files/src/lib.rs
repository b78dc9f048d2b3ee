use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("The file's magic value does not match the expectation {magic:#010x}")]
    InvalidMagicValue { magic: u32 },

    /// A declared size or element count needs more bytes than the buffer holds.
    #[error("The {section} section needs {needed} bytes, but only {available} are left")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("The file is violating the expected format, because: {reason}")]
    FormatError { reason: String },

    #[error("The container variant {variant} is not supported")]
    Unsupported { variant: &'static str },

    /// Errors of third party decoders that don't mix with ours (e.g. the nom errors of image-blp).
    #[error("{0}")]
    Foreign(String),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl ParserError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        ParserError::FormatError { reason: reason.into() }
    }
}

pub mod common;
pub mod image;
pub mod mesh;
