use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::SteganoError;
use crate::result::Result;

/// width of the big endian byte count in front of a framed message
pub const LENGTH_HEADER_BITS: u32 = 20;

/// the largest byte count the length header can describe
pub const MAX_FRAMED_LEN: usize = (1 << LENGTH_HEADER_BITS) - 1;

/// How a message is laid out as bits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// 20 bit byte count, then the message bits
    #[default]
    LengthHeader,
    /// Only the message bits. There is no way to tell where the message ends,
    /// so unveiling needs `expected_len` bytes from the caller.
    Unframed { expected_len: Option<usize> },
}

impl Framing {
    pub fn header_bits(&self) -> u64 {
        match self {
            Framing::LengthHeader => u64::from(LENGTH_HEADER_BITS),
            Framing::Unframed { .. } => 0,
        }
    }

    /// number of bits a message of `len` bytes occupies
    pub fn required_bits(&self, len: usize) -> u64 {
        (len as u64)
            .saturating_mul(8)
            .saturating_add(self.header_bits())
    }

    /// fails if `len` bytes cannot be described by this framing
    pub fn check_len(&self, len: usize) -> Result<()> {
        if *self == Framing::LengthHeader && len > MAX_FRAMED_LEN {
            return Err(SteganoError::PayloadTooLarge {
                len,
                max: MAX_FRAMED_LEN,
            });
        }

        Ok(())
    }
}

/// A finite sequence of bits, most significant bit of every byte first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    bytes: Vec<u8>,
    len: u64,
}

impl Bitstream {
    /// Frames `payload` according to `framing`.
    pub fn frame(payload: &[u8], framing: Framing) -> Result<Self> {
        framing.check_len(payload.len())?;

        let mut writer = BitWriter::endian(Vec::with_capacity(payload.len() + 3), BigEndian);
        if framing == Framing::LengthHeader {
            writer.write(LENGTH_HEADER_BITS, payload.len() as u32)?;
        }
        writer.write_bytes(payload)?;
        writer.byte_align()?;

        Ok(Self {
            bytes: writer.into_writer(),
            len: framing.required_bits(payload.len()),
        })
    }

    /// number of bits, padding excluded
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// pulls the bits one by one, `None` once all are consumed
    pub fn bits(&self) -> Bits<'_> {
        Bits {
            reader: BitReader::endian(&self.bytes[..], BigEndian),
            remaining: self.len,
        }
    }
}

pub struct Bits<'b> {
    reader: BitReader<&'b [u8], BigEndian>,
    remaining: u64,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.reader.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

/// Reads the 20 bit byte count from the front of a bit sequence.
///
/// Returns `None` if the sequence ends before the header is complete.
pub fn read_length_header(bits: &mut impl Iterator<Item = bool>) -> Option<u64> {
    let mut len = 0u64;
    for _ in 0..LENGTH_HEADER_BITS {
        len = (len << 1) | u64::from(bits.next()?);
    }
    Some(len)
}

/// Packs bits, most significant first, into bytes.
/// A trailing partial byte is padded with zeros.
pub fn collect_bytes(bits: impl Iterator<Item = bool>, len_hint: usize) -> Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::with_capacity(len_hint), BigEndian);
    for bit in bits {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;

    Ok(writer.into_writer())
}
