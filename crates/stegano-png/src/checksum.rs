//! Checksum and byte arithmetic shared by the container and the scanline filters.

/// Standard CRC-32 as used for PNG records.
pub fn checksum32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// CRC-32 over the concatenation of a record type tag and its payload,
/// without materializing the concatenation.
pub fn record_checksum(record_type: &[u8], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(record_type);
    hasher.update(payload);
    hasher.finalize()
}

/// Wraps an arithmetic result into `0..=255` with floor modulo,
/// so `-1` becomes `255` and not `1`.
#[inline]
pub fn clamp_byte(value: i32) -> u8 {
    value.rem_euclid(256) as u8
}
