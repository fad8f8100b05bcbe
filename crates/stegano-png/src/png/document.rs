use log::debug;

use super::{ImageHeader, Record, RecordType, SIGNATURE};
use crate::error::SteganoError;
use crate::result::Result;

/// A PNG file split into its records.
///
/// The pixel data records are expected to form one block; records in front
/// of that block are the prefix, everything non IDAT behind it (usually just
/// IEND) is the suffix. Both are written back untouched.
#[derive(Debug, Clone)]
pub struct ImageDocument {
    records: Vec<Record>,
    header: ImageHeader,
    first_pixel_record: usize,
}

impl ImageDocument {
    /// Parses `bytes` and verifies every record checksum.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_with(bytes, true)
    }

    /// Parses `bytes`, checksums are only verified if asked for.
    pub fn parse_with(bytes: &[u8], verify_checksums: bool) -> Result<Self> {
        if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
            return Err(SteganoError::InvalidSignature);
        }

        let mut records = Vec::new();
        let mut offset = SIGNATURE.len();
        while offset < bytes.len() {
            let (record, next) = Record::read_at(bytes, offset)?;
            if verify_checksums {
                record.verify()?;
            }
            records.push(record);
            offset = next;
        }

        let header = match records.first() {
            Some(first) if first.record_type() == RecordType::IHDR => {
                ImageHeader::from_payload(first.payload())?
            }
            _ => return Err(SteganoError::MissingHeader),
        };
        let first_pixel_record = records
            .iter()
            .position(|r| r.record_type() == RecordType::IDAT)
            .ok_or(SteganoError::MissingPixelData)?;

        debug!(
            "parsed {}x{} {:?} image with {} records",
            header.width,
            header.height,
            header.layout,
            records.len()
        );

        Ok(Self {
            records,
            header,
            first_pixel_record,
        })
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// records in front of the first IDAT record, IEND excluded
    pub fn before_pixel_data(&self) -> impl Iterator<Item = &Record> {
        self.records[..self.first_pixel_record]
            .iter()
            .filter(|r| r.record_type() != RecordType::IEND)
    }

    /// all IDAT records in file order
    pub fn pixel_data(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|r| r.record_type() == RecordType::IDAT)
    }

    /// non IDAT records behind the first IDAT record, IEND included
    pub fn after_pixel_data(&self) -> impl Iterator<Item = &Record> {
        self.records[self.first_pixel_record..]
            .iter()
            .filter(|r| r.record_type() != RecordType::IDAT)
    }

    /// the concatenated, still compressed payload of all IDAT records
    pub fn compressed_pixel_data(&self) -> Vec<u8> {
        self.pixel_data().fold(Vec::new(), |mut stream, r| {
            stream.extend_from_slice(r.payload());
            stream
        })
    }

    /// the file bytes, identical to what was parsed
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = SIGNATURE.to_vec();
        for record in self.records.iter() {
            bytes.extend_from_slice(record.as_bytes());
        }
        bytes
    }
}
