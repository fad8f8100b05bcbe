//! LSB embedding of a bitstream into the red, green and blue channels of a
//! [`PixelGrid`](crate::grid::PixelGrid).
//!
//! Pixels are visited column by column, see [`ColumnMajor`]. Each pixel
//! carries up to three message bits, the alpha channel is left alone.

mod framing;
mod lsb;
mod traversal;

pub use framing::{Bitstream, Bits, Framing, LENGTH_HEADER_BITS, MAX_FRAMED_LEN};
pub use lsb::{capacity_bits, check_capacity, embed, extract, required_bits, HideBit};
pub use traversal::{payload_offsets, ColumnMajor, PAYLOAD_CHANNELS};
