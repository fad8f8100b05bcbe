use log::debug;

use super::{ImageDocument, Record, RecordType, SIGNATURE};
use crate::error::SteganoError;
use crate::result::Result;

/// the record size most encoders use for IDAT
pub const DEFAULT_MAX_RECORD_SIZE: usize = 16384;

/// PNG limits record lengths to 2^31 - 1
pub const MAX_RECORD_SIZE: usize = (1 << 31) - 1;

/// Splits a compressed pixel stream into IDAT records of at most
/// `max_record_size` bytes each, in order.
///
/// An empty stream still yields one (empty) IDAT record, a PNG without any
/// is not valid.
pub fn rechunk(compressed: &[u8], max_record_size: usize) -> Result<Vec<Record>> {
    if !(1..=MAX_RECORD_SIZE).contains(&max_record_size) {
        return Err(SteganoError::InvalidRecordSize(max_record_size));
    }
    if compressed.is_empty() {
        return Ok(vec![Record::new(RecordType::IDAT, Vec::new())]);
    }
    let records: Vec<Record> = compressed
        .chunks(max_record_size)
        .map(|slice| Record::new(RecordType::IDAT, slice.to_vec()))
        .collect();
    debug!(
        "re-chunked {} compressed bytes into {} IDAT records",
        compressed.len(),
        records.len()
    );

    Ok(records)
}

/// Writes the signature, the untouched records in front of the pixel data,
/// the given pixel data records and the untouched trailing records.
pub fn assemble(document: &ImageDocument, pixel_records: &[Record]) -> Vec<u8> {
    let capacity = SIGNATURE.len()
        + document
            .records()
            .iter()
            .filter(|r| r.record_type() != RecordType::IDAT)
            .chain(pixel_records)
            .map(|r| r.as_bytes().len())
            .sum::<usize>();
    let mut bytes = Vec::with_capacity(capacity);
    bytes.extend_from_slice(&SIGNATURE);
    for record in document
        .before_pixel_data()
        .chain(pixel_records)
        .chain(document.after_pixel_data())
    {
        bytes.extend_from_slice(record.as_bytes());
    }

    bytes
}
