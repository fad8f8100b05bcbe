use crate::error::SteganoError;
use crate::png::emit::MAX_RECORD_SIZE;
use crate::png::DEFAULT_MAX_RECORD_SIZE;
use crate::result::Result;
use crate::stego::Framing;

/// Codec configuration for hiding and unveiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// How the message is framed inside the bitstream.
    /// The length header framing is the only one that can be unveiled without
    /// knowing the message length up front.
    pub framing: Framing,

    /// Upper bound for the payload length of each emitted IDAT record.
    pub max_record_size: usize,

    /// zlib effort used when the modified pixel data is compressed again.
    pub compression: CompressionLevel,

    /// If true every record checksum of the carrier is verified while parsing,
    /// a mismatch aborts the whole operation.
    pub verify_checksums: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            framing: Framing::LengthHeader,
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            compression: CompressionLevel::Default,
            verify_checksums: true,
        }
    }
}

impl CodecOptions {
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_max_record_size(mut self, max_record_size: usize) -> Self {
        self.max_record_size = max_record_size;
        self
    }

    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_verify_checksums(mut self, verify_checksums: bool) -> Self {
        self.verify_checksums = verify_checksums;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_RECORD_SIZE).contains(&self.max_record_size) {
            return Err(SteganoError::InvalidRecordSize(self.max_record_size));
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    Fast,
    #[default]
    Default,
    Best,
}

impl From<CompressionLevel> for flate2::Compression {
    fn from(value: CompressionLevel) -> Self {
        match value {
            CompressionLevel::Fast => flate2::Compression::fast(),
            CompressionLevel::Default => flate2::Compression::default(),
            CompressionLevel::Best => flate2::Compression::best(),
        }
    }
}
