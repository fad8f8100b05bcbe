//! # Stegano PNG
//!
//! Hides a text message in the least significant bits of a PNG image, and
//! unveils it again. The container is taken apart by hand: records are parsed
//! and checksummed, the pixel data is inflated and defiltered into a
//! [`PixelGrid`], the message bits go into the red, green and blue channels in
//! column major order and the grid is refiltered, deflated and split into new
//! IDAT records. Every other record of the carrier is written back untouched.
//!
//! Only 8 bit truecolor images (RGB and RGBA) without interlacing are
//! supported.
//!
//! # Usage Examples
//!
//! ## Hide a message inside an image
//!
//! ```rust,no_run
//! stegano_png::api::embed::prepare()
//!     .with_message("Hello, World!")
//!     .with_image("carrier.png")
//!     .with_output("image-with-a-message-inside.png")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```
//!
//! ## Unveil a message from an image
//!
//! ```rust,no_run
//! let message = stegano_png::api::extract::prepare()
//!     .from_secret_file("image-with-a-message-inside.png")
//!     .execute()
//!     .expect("Failed to unveil message from image");
//! assert_eq!(message, "Hello, World!");
//! ```
//!
//! ## In memory
//!
//! ```rust,no_run
//! use stegano_png::{embed_text, extract_text, CodecOptions, NoProgress};
//!
//! let carrier = std::fs::read("carrier.png").expect("Cannot read carrier");
//! let opts = CodecOptions::default();
//! let secret = embed_text(&carrier, "Hi", &opts, &mut NoProgress).expect("Cannot hide message");
//! assert_eq!(extract_text(&secret, &opts, &mut NoProgress).expect("Cannot unveil"), "Hi");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod checksum;
pub mod commands;
pub mod error;
pub mod filter;
pub mod grid;
pub mod options;
pub mod pipeline;
pub mod png;
pub mod progress;
pub mod result;
pub mod stego;
mod zlib;

pub use crate::error::SteganoError;
pub use crate::grid::PixelGrid;
pub use crate::options::{CodecOptions, CompressionLevel};
pub use crate::pipeline::{capacity, embed_bytes, embed_text, extract_bytes, extract_text};
pub use crate::progress::{NoProgress, Progress, ProgressEvent};
pub use crate::result::Result;
pub use crate::stego::Framing;
