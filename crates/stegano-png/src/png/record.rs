use std::fmt;

use byteorder::{BigEndian, ReadBytesExt};
use log::trace;

use crate::checksum::record_checksum;
use crate::error::SteganoError;
use crate::result::Result;

/// length + type in front of the payload
const RECORD_HEAD_LEN: usize = 8;
/// checksum behind the payload
const RECORD_TAIL_LEN: usize = 4;

/// Four ASCII letters naming a record, like `IHDR`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordType(pub [u8; 4]);

impl RecordType {
    pub const IHDR: Self = Self(*b"IHDR");
    pub const IDAT: Self = Self(*b"IDAT");
    pub const IEND: Self = Self(*b"IEND");

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordType({self})")
    }
}

/// One length prefixed, typed and checksummed unit of a PNG file.
///
/// The exact bytes a record was read from are kept next to the decoded
/// fields, so untouched records can be written back bit for bit.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    record_type: RecordType,
    payload: Vec<u8>,
    checksum: u32,
    raw: Vec<u8>,
}

impl Record {
    /// builds a fresh record, the checksum is computed over type and payload
    pub fn new(record_type: RecordType, payload: Vec<u8>) -> Self {
        let checksum = record_checksum(record_type.as_bytes(), &payload);
        let mut raw = Vec::with_capacity(RECORD_HEAD_LEN + payload.len() + RECORD_TAIL_LEN);
        raw.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        raw.extend_from_slice(record_type.as_bytes());
        raw.extend_from_slice(&payload);
        raw.extend_from_slice(&checksum.to_be_bytes());

        Self {
            record_type,
            payload,
            checksum,
            raw,
        }
    }

    /// Reads the record starting at `offset` and returns it together with the
    /// offset of the next record.
    pub(crate) fn read_at(bytes: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut head = bytes.get(offset..).unwrap_or_default();
        if head.len() < RECORD_HEAD_LEN {
            return Err(SteganoError::TruncatedRecord {
                offset,
                declared: 0,
            });
        }
        let declared = head.read_u32::<BigEndian>()?;
        let mut record_type = [0; 4];
        record_type.copy_from_slice(&head[..4]);
        let record_type = RecordType(record_type);

        let end = (declared as usize)
            .checked_add(offset + RECORD_HEAD_LEN + RECORD_TAIL_LEN)
            .filter(|end| *end <= bytes.len())
            .ok_or(SteganoError::TruncatedRecord { offset, declared })?;

        let payload_start = offset + RECORD_HEAD_LEN;
        let payload_end = payload_start + declared as usize;
        let payload = bytes[payload_start..payload_end].to_vec();
        let checksum = (&bytes[payload_end..end]).read_u32::<BigEndian>()?;

        trace!("read {record_type} record at offset {offset} with {declared} bytes");

        Ok((
            Self {
                record_type,
                payload,
                checksum,
                raw: bytes[offset..end].to_vec(),
            },
            end,
        ))
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// declared payload length
    pub fn length(&self) -> u32 {
        self.payload.len() as u32
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// the checksum as stored in the file
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn computed_checksum(&self) -> u32 {
        record_checksum(self.record_type.as_bytes(), &self.payload)
    }

    pub fn verify(&self) -> Result<()> {
        let computed = self.computed_checksum();
        if computed != self.checksum {
            return Err(SteganoError::ChecksumMismatch {
                record_type: self.record_type,
                stored: self.checksum,
                computed,
            });
        }

        Ok(())
    }

    /// the wire bytes of this record
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("record_type", &self.record_type)
            .field("length", &self.payload.len())
            .field("checksum", &format_args!("{:#010x}", self.checksum))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IEND_BYTES: [u8; 12] = [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82];

    #[test]
    fn should_build_the_well_known_iend_record() {
        let iend = Record::new(RecordType::IEND, Vec::new());

        assert_eq!(iend.as_bytes(), &IEND_BYTES[..]);
        assert_eq!(iend.length(), 0);
        assert_eq!(iend.checksum(), 0xAE42_6082);
    }

    #[test]
    fn should_frame_the_payload_with_big_endian_length_and_checksum() {
        let payload = vec![0x5a; 0x0102];
        let record = Record::new(RecordType::IDAT, payload.clone());
        let bytes = record.as_bytes();

        assert_eq!(bytes.len(), 8 + 0x0102 + 4);
        assert_eq!(&bytes[..8], &[0, 0, 0x01, 0x02, b'I', b'D', b'A', b'T']);
        assert_eq!(&bytes[8..8 + 0x0102], &payload[..]);
        assert_eq!(
            &bytes[8 + 0x0102..],
            &record_checksum(b"IDAT", &payload).to_be_bytes()
        );
    }

    #[test]
    fn should_read_a_record_and_point_to_the_next_one() {
        let text = Record::new(RecordType(*b"tEXt"), b"Comment\0hello".to_vec());
        let mut bytes = text.as_bytes().to_vec();
        bytes.extend_from_slice(&IEND_BYTES);

        let (first, next) = Record::read_at(&bytes, 0).expect("first record");
        assert_eq!(first, text);
        assert_eq!(first.payload(), b"Comment\0hello");
        assert_eq!(next, 12 + 13);

        let (second, next) = Record::read_at(&bytes, next).expect("second record");
        assert_eq!(second.record_type(), RecordType::IEND);
        assert_eq!(next, bytes.len());
        assert!(second.verify().is_ok());
    }

    #[test]
    fn should_fail_on_a_length_reaching_past_the_end() {
        let mut bytes = Record::new(RecordType::IDAT, vec![1, 2, 3, 4]).as_bytes().to_vec();
        bytes.truncate(bytes.len() - 1);

        match Record::read_at(&bytes, 0) {
            Err(SteganoError::TruncatedRecord { offset, declared }) => {
                assert_eq!(offset, 0);
                assert_eq!(declared, 4);
            }
            other => panic!("expected a truncated record, got {other:?}"),
        }
    }

    #[test]
    fn should_fail_on_a_partial_record_head() {
        let bytes = [0, 0, 0, 0, b'I', b'E'];

        assert!(matches!(
            Record::read_at(&bytes, 0),
            Err(SteganoError::TruncatedRecord { declared: 0, .. })
        ));
    }

    #[test]
    fn should_detect_a_checksum_mismatch() {
        let mut bytes = IEND_BYTES;
        bytes[11] ^= 0xff;
        let (record, _) = Record::read_at(&bytes, 0).expect("record is structurally fine");

        assert!(matches!(
            record.verify(),
            Err(SteganoError::ChecksumMismatch { stored: 0xAE42_607D, computed: 0xAE42_6082, .. })
        ));
    }

    #[test]
    fn record_type_should_display_as_ascii() {
        assert_eq!(RecordType::IDAT.to_string(), "IDAT");
        assert_eq!(RecordType([b'a', 0, b'b', b'c']).to_string(), "a\\x00bc");
    }
}
