use std::string::FromUtf8Error;
use thiserror::Error;

use crate::png::RecordType;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents a file that does not start with the PNG signature
    #[error("Image media is invalid: PNG signature mismatch")]
    InvalidSignature,

    /// Represents a record whose declared length runs past the end of the file
    #[error("Image media is invalid: record at offset {offset} declares {declared} bytes past the end of input")]
    TruncatedRecord { offset: usize, declared: u32 },

    /// Represents a record whose stored CRC does not match its type and payload
    #[error("Image media is invalid: checksum mismatch in {record_type} record (stored {stored:#010x}, computed {computed:#010x})")]
    ChecksumMismatch {
        record_type: RecordType,
        stored: u32,
        computed: u32,
    },

    /// Represents a file where the first record is not the image header
    #[error("Image media is invalid: the first record is not IHDR")]
    MissingHeader,

    /// Represents an image header record that is too short to carry all fields
    #[error("Image media is invalid: IHDR payload has {0} bytes, 13 expected")]
    MalformedHeader(usize),

    /// Represents a file without any IDAT record
    #[error("Image media is invalid: no IDAT record found")]
    MissingPixelData,

    /// Represents an image header with a zero dimension
    #[error("Image media is invalid: dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Represents a scanline with a filter tag outside of 0..=4
    #[error("Image media is invalid: scanline {row} uses unknown filter type {tag}")]
    InvalidFilterType { row: usize, tag: u8 },

    /// Represents a decompressed pixel stream that is shorter than the header promises
    #[error("Image media is invalid: decompressed pixel data has {actual} bytes, {expected} expected")]
    PixelDataSizeMismatch { expected: usize, actual: usize },

    /// Represents a color mode other than truecolor (2) or truecolor with alpha (6)
    #[error("Image with color type {0} is not supported. Supported color types: 2, 6")]
    UnsupportedColorMode(u8),

    /// Represents a bit depth other than 8 bits per channel
    #[error("Image with bit depth {0} is not supported. Supported bit depth: 8")]
    UnsupportedBitDepth(u8),

    /// Represents an interlaced image
    #[error("Image with interlace method {0} is not supported")]
    UnsupportedInterlace(u8),

    #[error(
        "Capacity Error: {required_bits} bits are required but the image only holds {capacity_bits} bits.
                The text exceeds the image capacity by {overage_chars} characters"
    )]
    CapacityExceeded {
        overage_chars: u64,
        required_bits: u64,
        capacity_bits: u64,
    },

    /// Represents a message that cannot be described by the 20 bit length header
    #[error("Payload of {len} bytes is too large, at most {max} bytes can be framed")]
    PayloadTooLarge { len: usize, max: usize },

    /// Represents a length header that announces more data than the image can hold
    #[error("No secret data found: length header announces {declared_bytes} bytes but the image only holds {capacity_bits} bits")]
    InvalidFrame {
        declared_bytes: u64,
        capacity_bits: u64,
    },

    /// Represents an unframed unveil without a payload length given by the caller
    #[error("Unframed payloads can only be unveiled with a known length")]
    MissingPayloadLength,

    /// Represents an unusable record size limit
    #[error("Invalid maximum record size {0}")]
    InvalidRecordSize(usize),

    /// Represents a failure of the zlib inflate step
    #[error("Decompression of the pixel data failed")]
    DecompressionFailure { source: std::io::Error },

    /// Represents a failure of the zlib deflate step
    #[error("Compression of the pixel data failed")]
    CompressionFailure { source: std::io::Error },

    /// Represents the error of invalid UTF-8 text data found inside of a message
    #[error("Invalid text data found inside a message")]
    InvalidTextData(#[from] FromUtf8Error),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}

impl SteganoError {
    /// true for every error that means the input is not a well formed PNG
    pub fn is_invalid_container(&self) -> bool {
        matches!(
            self,
            SteganoError::InvalidSignature
                | SteganoError::TruncatedRecord { .. }
                | SteganoError::ChecksumMismatch { .. }
                | SteganoError::MissingHeader
                | SteganoError::MalformedHeader(_)
                | SteganoError::MissingPixelData
                | SteganoError::InvalidDimensions { .. }
                | SteganoError::InvalidFilterType { .. }
                | SteganoError::PixelDataSizeMismatch { .. }
        )
    }
}
