use byteorder::{BigEndian, ByteOrder};

use crate::error::SteganoError;
use crate::result::Result;

const IHDR_LEN: usize = 13;
const COLOR_MODE_RGB: u8 = 2;
const COLOR_MODE_RGBA: u8 = 6;

/// Channel layout implied by the PNG color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// color type 2, red green blue
    Rgb,
    /// color type 6, red green blue alpha
    Rgba,
}

impl ChannelLayout {
    pub fn from_color_mode(color_mode: u8) -> Result<Self> {
        match color_mode {
            COLOR_MODE_RGB => Ok(ChannelLayout::Rgb),
            COLOR_MODE_RGBA => Ok(ChannelLayout::Rgba),
            other => Err(SteganoError::UnsupportedColorMode(other)),
        }
    }

    pub fn color_mode(self) -> u8 {
        match self {
            ChannelLayout::Rgb => COLOR_MODE_RGB,
            ChannelLayout::Rgba => COLOR_MODE_RGBA,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        self == ChannelLayout::Rgba
    }
}

/// The fields of the IHDR record this crate relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_mode: u8,
    pub interlace: u8,
    pub layout: ChannelLayout,
}

impl ImageHeader {
    /// Decodes and validates an IHDR payload.
    ///
    /// Only 8 bit, non interlaced truecolor images with or without alpha
    /// are accepted.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() < IHDR_LEN {
            return Err(SteganoError::MalformedHeader(payload.len()));
        }
        let width = BigEndian::read_u32(&payload[0..4]);
        let height = BigEndian::read_u32(&payload[4..8]);
        let bit_depth = payload[8];
        let color_mode = payload[9];
        let interlace = payload[12];

        if width == 0 || height == 0 {
            return Err(SteganoError::InvalidDimensions { width, height });
        }
        let layout = ChannelLayout::from_color_mode(color_mode)?;
        if bit_depth != 8 {
            return Err(SteganoError::UnsupportedBitDepth(bit_depth));
        }
        if interlace != 0 {
            return Err(SteganoError::UnsupportedInterlace(interlace));
        }
        // every size derived from the header has to fit in memory
        (width as usize)
            .checked_mul(layout.bytes_per_pixel())
            .and_then(|stride| stride.checked_add(1))
            .and_then(|scanline| scanline.checked_mul(height as usize))
            .ok_or(SteganoError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            bit_depth,
            color_mode,
            interlace,
            layout,
        })
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.layout.bytes_per_pixel()
    }

    /// pixel bytes of one row, without the filter tag
    pub fn stride(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// filter tag plus pixel bytes of one row
    pub fn scanline_len(&self) -> usize {
        1 + self.stride()
    }

    /// size of the decompressed pixel stream
    pub fn pixel_stream_len(&self) -> usize {
        self.scanline_len() * self.height as usize
    }
}
