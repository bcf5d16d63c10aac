//! Error types for the DCT1 codec.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid DCT1 stream: bad magic {}", String::from_utf8_lossy(.found))]
    Format { found: [u8; 4] },

    #[error("Corrupt header: {0}")]
    CorruptHeader(String),

    #[error(
        "Coefficient overflow in block {block}, index {index}: {value} does not fit in {bits} bits"
    )]
    CoefficientOverflow {
        block: usize,
        index: usize,
        value: i64,
        bits: u16,
    },

    #[error("Unexpected end of stream: needed {needed} bits, {available} available")]
    UnexpectedEof { needed: u32, available: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// result type for codec stuff
pub type CodecResult<T> = Result<T, CodecError>;
