#![allow(dead_code)]

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder, ImageFormat, RgbaImage};
use stegano_png::png::{Record, RecordType, SIGNATURE};

/// Encodes raw 8 bit pixels with the `image` crate, adaptive filtering picks a
/// different filter type per row.
pub fn encode_png(width: u32, height: u32, color: ColorType, pixels: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Default, FilterType::Adaptive)
        .write_image(pixels, width, height, color)
        .expect("Failed to encode png");
    buf
}

/// Noisy but deterministic channel values
pub fn pattern(width: u32, height: u32, channels: usize) -> Vec<u8> {
    (0..width as usize * height as usize * channels)
        .map(|i| ((i * 7919) ^ (i / channels * 31)) as u8)
        .collect()
}

pub fn rgb_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(width, height, ColorType::Rgb8, &pattern(width, height, 3))
}

pub fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(width, height, ColorType::Rgba8, &pattern(width, height, 4))
}

/// Decodes with the `image` crate, independent of this crate's decoder
pub fn decode_rgba(png: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(png, ImageFormat::Png)
        .expect("Failed to decode png")
        .to_rgba8()
}

/// Inserts `record` right behind the IHDR record
pub fn with_record_after_header(png: &[u8], record: &Record) -> Vec<u8> {
    // signature plus the 25 bytes of IHDR
    let split = 8 + 25;
    let mut bytes = png[..split].to_vec();
    bytes.extend_from_slice(record.as_bytes());
    bytes.extend_from_slice(&png[split..]);
    bytes
}

/// Inserts `record` right in front of the IEND record
pub fn with_record_before_end(png: &[u8], record: &Record) -> Vec<u8> {
    let split = png.len() - 12;
    let mut bytes = png[..split].to_vec();
    bytes.extend_from_slice(record.as_bytes());
    bytes.extend_from_slice(&png[split..]);
    bytes
}

pub fn text_record(keyword: &str, text: &str) -> Record {
    let mut payload = keyword.as_bytes().to_vec();
    payload.push(0);
    payload.extend_from_slice(text.as_bytes());
    Record::new(RecordType(*b"tEXt"), payload)
}

/// A PNG whose IHDR announces `width` x `height` pixels while its single IDAT
/// record holds an empty zlib stream.
pub fn png_announcing(width: u32, height: u32, color_mode: u8) -> Vec<u8> {
    let mut ihdr = width.to_be_bytes().to_vec();
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, color_mode, 0, 0, 0]);

    let mut bytes = SIGNATURE.to_vec();
    for record in [
        Record::new(RecordType::IHDR, ihdr),
        Record::new(RecordType::IDAT, vec![0x78, 0x9c, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01]),
        Record::new(RecordType::IEND, Vec::new()),
    ] {
        bytes.extend_from_slice(record.as_bytes());
    }
    bytes
}
