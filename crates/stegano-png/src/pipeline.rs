//! The in-memory embed and extract pipelines.
//!
//! parse -> inflate and defilter -> LSB embed -> refilter and deflate ->
//! re-chunk -> assemble. Nothing is returned until every stage succeeded.

use log::{debug, info};

use crate::error::SteganoError;
use crate::grid::PixelGrid;
use crate::options::CodecOptions;
use crate::png::{assemble, rechunk, ImageDocument};
use crate::progress::Progress;
use crate::result::Result;
use crate::stego;

/// Hides `payload` in the PNG `carrier` and returns the new PNG bytes.
///
/// Records other than IDAT are copied verbatim, the pixel data is
/// recompressed and split into records of at most
/// [`CodecOptions::max_record_size`] bytes.
pub fn embed_bytes(
    carrier: &[u8],
    payload: &[u8],
    opts: &CodecOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<u8>> {
    opts.validate()?;
    let document = ImageDocument::parse_with(carrier, opts.verify_checksums)?;
    let header = document.header();

    opts.framing.check_len(payload.len())?;
    stego::check_capacity(
        stego::required_bits(payload.len(), opts.framing),
        stego::capacity_bits(header.width, header.height),
    )?;

    let mut grid =
        PixelGrid::decode_compressed(&document.compressed_pixel_data(), header, progress)?;
    stego::embed(&mut grid, payload, opts.framing, progress)?;
    let compressed = grid.encode_compressed(opts.compression, progress)?;
    let pixel_records = rechunk(&compressed, opts.max_record_size)?;

    let output = assemble(&document, &pixel_records);
    info!(
        "hid {} bytes in a {}x{} image, {} bytes written",
        payload.len(),
        header.width,
        header.height,
        output.len()
    );

    Ok(output)
}

/// Unveils the payload hidden in the PNG `carrier`.
pub fn extract_bytes(
    carrier: &[u8],
    opts: &CodecOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<u8>> {
    let document = ImageDocument::parse_with(carrier, opts.verify_checksums)?;
    if let stego::Framing::Unframed { expected_len: None } = opts.framing {
        return Err(SteganoError::MissingPayloadLength);
    }

    let grid = PixelGrid::decode_compressed(
        &document.compressed_pixel_data(),
        document.header(),
        progress,
    )?;
    let payload = stego::extract(&grid, opts.framing, progress)?;
    debug!("unveiled {} bytes", payload.len());

    Ok(payload)
}

/// [`embed_bytes`] for a text message, the text is hidden as its UTF-8 bytes
pub fn embed_text(
    carrier: &[u8],
    text: &str,
    opts: &CodecOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<u8>> {
    embed_bytes(carrier, text.as_bytes(), opts, progress)
}

/// [`extract_bytes`], the payload has to be valid UTF-8
pub fn extract_text(
    carrier: &[u8],
    opts: &CodecOptions,
    progress: &mut dyn Progress,
) -> Result<String> {
    let payload = extract_bytes(carrier, opts, progress)?;

    Ok(String::from_utf8(payload)?)
}

/// Number of payload bytes `carrier` can hold with the configured framing.
///
/// Only the container is parsed, the pixel data stays compressed.
pub fn capacity(carrier: &[u8], opts: &CodecOptions) -> Result<u64> {
    let document = ImageDocument::parse_with(carrier, opts.verify_checksums)?;
    let header = document.header();
    let bits = stego::capacity_bits(header.width, header.height);
    let bytes = bits.saturating_sub(opts.framing.header_bits()) / 8;

    Ok(match opts.framing {
        stego::Framing::LengthHeader => bytes.min(stego::MAX_FRAMED_LEN as u64),
        stego::Framing::Unframed { .. } => bytes,
    })
}
