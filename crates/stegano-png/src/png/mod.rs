//! The PNG container: signature, records and the IHDR fields this crate needs.
//!
//! Only IHDR, IDAT and IEND are interpreted. Every other record is carried
//! along as raw bytes.

mod document;
pub mod emit;
mod header;
mod record;

pub use document::ImageDocument;
pub use emit::{assemble, rechunk, DEFAULT_MAX_RECORD_SIZE};
pub use header::{ChannelLayout, ImageHeader};
pub use record::{Record, RecordType};

/// The 8 magic bytes every PNG file starts with.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
