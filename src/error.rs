use thiserror::Error;

/// Everything that can go wrong while decoding or encoding. Decoding is
/// all-or-nothing: the first error aborts the whole call.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed png: {reason}")]
    Format { reason: String },
    #[error("crc mismatch in {chunk_type} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    Checksum {
        chunk_type: String,
        stored: u32,
        computed: u32,
    },
    #[error("unsupported png: {reason}")]
    Unsupported { reason: String },
    #[error("corrupt compressed image data: {0}")]
    Compression(String),
    #[error("pixel ({x}, {y}) is out of range for a {width}x{height} image")]
    OutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl PngError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }
}
