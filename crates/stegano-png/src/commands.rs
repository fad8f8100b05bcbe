use std::fs;
use std::path::Path;

use crate::progress::NoProgress;
use crate::{pipeline, CodecOptions, SteganoError};

fn read_carrier(input: &Path) -> Result<Vec<u8>, SteganoError> {
    fs::read(input).map_err(|source| SteganoError::ReadError { source })
}

/// Hides `message` in the PNG at `input` and writes the result to `output`.
/// `output` is only created once the new image is complete.
pub fn embed(
    message: &str,
    input: &Path,
    output: &Path,
    opts: &CodecOptions,
) -> Result<(), SteganoError> {
    let carrier = read_carrier(input)?;
    let secret = pipeline::embed_text(&carrier, message, opts, &mut NoProgress)?;

    fs::write(output, secret).map_err(|source| SteganoError::WriteError { source })
}

/// Unveils the text message hidden in the PNG at `input`.
pub fn extract(input: &Path, opts: &CodecOptions) -> Result<String, SteganoError> {
    let carrier = read_carrier(input)?;

    pipeline::extract_text(&carrier, opts, &mut NoProgress)
}

/// Number of message bytes the PNG at `input` can carry.
pub fn capacity(input: &Path, opts: &CodecOptions) -> Result<u64, SteganoError> {
    let carrier = read_carrier(input)?;

    pipeline::capacity(&carrier, opts)
}
