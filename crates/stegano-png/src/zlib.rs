//! zlib inflate/deflate of the IDAT stream, delegated to `flate2`.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use log::error;

use crate::error::SteganoError;
use crate::options::CompressionLevel;
use crate::result::Result;

/// Inflates `compressed`, stopping after `limit` bytes.
///
/// The output grows with the data actually decompressed, `limit` is never
/// allocated up front.
pub fn inflate(compressed: &[u8], limit: u64) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(compressed)
        .take(limit)
        .read_to_end(&mut out)
        .map_err(|source| {
            error!("Error inflating pixel data: {source}");
            SteganoError::DecompressionFailure { source }
        })?;

    Ok(out)
}

pub fn deflate(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), level.into());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|source| {
            error!("Error deflating pixel data: {source}");
            SteganoError::CompressionFailure { source }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_with_every_level() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i * 7 % 251) as u8).collect();

        for level in [
            CompressionLevel::Fast,
            CompressionLevel::Default,
            CompressionLevel::Best,
        ] {
            let compressed = deflate(&data, level).expect("deflate");
            assert_eq!(inflate(&compressed, u64::MAX).expect("inflate"), data);
        }
    }

    #[test]
    fn should_report_corrupt_streams() {
        let result = inflate(&[0x78, 0x9c, 0xff, 0xff, 0xff, 0xff], 64);

        assert!(matches!(
            result,
            Err(SteganoError::DecompressionFailure { .. })
        ));
    }

    #[test]
    fn should_stop_at_the_limit() {
        let compressed = deflate(&[9; 10_000], CompressionLevel::Fast).expect("deflate");

        assert_eq!(inflate(&compressed, 100).expect("inflate"), vec![9; 100]);
    }
}
