use log::debug;

use super::framing::{collect_bytes, read_length_header, Bitstream, Framing};
use super::traversal::{payload_offsets, PAYLOAD_CHANNELS};
use crate::error::SteganoError;
use crate::grid::PixelGrid;
use crate::progress::{Progress, ProgressEvent, BIT_REPORT_INTERVAL};
use crate::result::Result;

pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

impl HideBit for &mut u8 {
    #[inline]
    fn hide_bit(self, bit: bool) {
        *self = (*self & (u8::MAX - 1)) | u8::from(bit);
    }
}

/// number of message bits an image of the given size can carry
pub fn capacity_bits(width: u32, height: u32) -> u64 {
    (u64::from(width) * u64::from(height)).saturating_mul(PAYLOAD_CHANNELS as u64)
}

/// number of bits a payload of `len` bytes occupies, header included
pub fn required_bits(len: usize, framing: Framing) -> u64 {
    framing.required_bits(len)
}

/// Fails with [`SteganoError::CapacityExceeded`] if `required_bits` do not fit.
/// The overage is reported in whole characters, rounded up.
pub fn check_capacity(required_bits: u64, capacity_bits: u64) -> Result<()> {
    if required_bits > capacity_bits {
        let overage_chars = (required_bits - capacity_bits).div_ceil(8);
        return Err(SteganoError::CapacityExceeded {
            overage_chars,
            required_bits,
            capacity_bits,
        });
    }

    Ok(())
}

/// Writes `payload` into the least significant bits of the red, green and
/// blue channels, pixel by pixel in column major order.
///
/// The capacity is checked first, on failure the grid stays untouched.
pub fn embed(
    grid: &mut PixelGrid,
    payload: &[u8],
    framing: Framing,
    progress: &mut dyn Progress,
) -> Result<()> {
    let stream = Bitstream::frame(payload, framing)?;
    let total = stream.len();
    check_capacity(total, grid.capacity_bits())?;

    let offsets = payload_offsets(grid.width(), grid.height(), grid.layout());
    let data = grid.data_mut();
    let mut done = 0u64;
    for (bit, offset) in stream.bits().zip(offsets) {
        data[offset].hide_bit(bit);
        done += 1;
        if done % BIT_REPORT_INTERVAL == 0 {
            progress.on_progress(ProgressEvent::BitsEmbedded { done, total });
        }
    }
    progress.on_progress(ProgressEvent::BitsEmbedded { done, total });
    debug!("embedded {total} bits ({} payload bytes)", payload.len());

    Ok(())
}

/// Reads a message back from the channel LSBs, in the same order [`embed`]
/// wrote them.
pub fn extract(grid: &PixelGrid, framing: Framing, progress: &mut dyn Progress) -> Result<Vec<u8>> {
    let capacity_bits = grid.capacity_bits();
    let data = grid.data();
    let mut bits = payload_offsets(grid.width(), grid.height(), grid.layout())
        .map(|offset| data[offset] & 1 == 1);

    let len = match framing {
        Framing::LengthHeader => {
            read_length_header(&mut bits).ok_or(SteganoError::InvalidFrame {
                declared_bytes: 0,
                capacity_bits,
            })?
        }
        Framing::Unframed {
            expected_len: Some(len),
        } => len as u64,
        Framing::Unframed { expected_len: None } => {
            return Err(SteganoError::MissingPayloadLength)
        }
    };

    let required = len
        .checked_mul(8)
        .and_then(|bits| bits.checked_add(framing.header_bits()))
        .filter(|required| *required <= capacity_bits);
    let Some(required) = required else {
        return Err(match framing {
            Framing::LengthHeader => SteganoError::InvalidFrame {
                declared_bytes: len,
                capacity_bits,
            },
            Framing::Unframed { .. } => {
                let required_bits = required_bits(len as usize, framing);
                SteganoError::CapacityExceeded {
                    overage_chars: (required_bits - capacity_bits).div_ceil(8),
                    required_bits,
                    capacity_bits,
                }
            }
        });
    };
    let total = required - framing.header_bits();

    let mut done = 0u64;
    let payload_bits = bits.take(total as usize).inspect(|_| {
        done += 1;
        if done % BIT_REPORT_INTERVAL == 0 {
            progress.on_progress(ProgressEvent::BitsExtracted { done, total });
        }
    });
    let payload = collect_bytes(payload_bits, len as usize)?;
    progress.on_progress(ProgressEvent::BitsExtracted { done: total, total });
    debug!("extracted {len} payload bytes");

    Ok(payload)
}
