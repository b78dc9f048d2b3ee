use std::io::ErrorKind;

use emberfall_files::ParserError;
use thiserror::Error;

/// Everything that can go wrong between a logical asset path and a decoded asset. These end up cached inside the
/// resolvers, so they are shared as `Arc<AssetError>` and never re-thrown.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset not found: {path}")]
    NotFound { path: String },

    #[error("{path}: unexpected signature {magic:#010x}")]
    SignatureMismatch { path: String, magic: u32 },

    #[error("{path}: truncated data, {reason}")]
    TruncatedData { path: String, reason: String },

    #[error("{path}: malformed data, {reason}")]
    Malformed { path: String, reason: String },

    #[error("{path}: {components} color channels per pixel can't be uploaded")]
    UnsupportedChannelLayout { path: String, components: u8 },

    #[error("{path}: I/O error while reading")]
    TransientIO {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: the decoder panicked")]
    DecodePanicked { path: String },

    #[error("{path}: the runtime shut down before loading completed")]
    Abandoned { path: String },
}

impl AssetError {
    pub fn from_parser(path: &str, err: ParserError) -> Self {
        let path = path.to_string();
        match err {
            ParserError::InvalidMagicValue { magic } => AssetError::SignatureMismatch { path, magic },
            ParserError::Truncated { .. } => AssetError::TruncatedData {
                path,
                reason: err.to_string(),
            },
            ParserError::IOError(io) if io.kind() == ErrorKind::UnexpectedEof => AssetError::TruncatedData {
                path,
                reason: io.to_string(),
            },
            ParserError::IOError(source) => AssetError::TransientIO { path, source },
            ParserError::FormatError { .. } | ParserError::Unsupported { .. } | ParserError::Foreign(_) => {
                AssetError::Malformed {
                    path,
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn from_io(path: &str, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::NotFound => AssetError::NotFound { path: path.to_string() },
            _ => AssetError::TransientIO {
                path: path.to_string(),
                source,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::NotFound { .. })
    }
}
