use std::path::PathBuf;

use clap::Args;
use log::info;
use stegano_png::{CodecOptions, Framing};

use crate::cli::Compression;
use crate::CliResult;

/// Hides a text message in a PNG image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message")]
    pub message: String,

    /// PNG image (RGB or RGBA, 8 bit) used as carrier, used readonly.
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        default_value = "output.png"
    )]
    pub write_to_file: PathBuf,

    /// Legacy layout without length header, unveiling then needs the message length
    #[arg(long)]
    pub unframed: bool,

    /// Upper bound for the size of each written IDAT record
    #[arg(long, value_name = "bytes", default_value_t = stegano_png::png::DEFAULT_MAX_RECORD_SIZE)]
    pub max_record_size: usize,

    /// zlib effort for the new pixel data
    #[arg(long, value_enum, default_value_t = Compression::Default)]
    pub compression: Compression,
}

impl HideArgs {
    pub fn codec_options(&self, options: CodecOptions) -> CodecOptions {
        let framing = if self.unframed {
            Framing::Unframed { expected_len: None }
        } else {
            Framing::LengthHeader
        };

        options
            .with_framing(framing)
            .with_max_record_size(self.max_record_size)
            .with_compression(self.compression.into())
    }

    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let options = self.codec_options(options);
        stegano_png::commands::embed(&self.message, &self.media, &self.write_to_file, &options)?;
        info!(
            "message hidden in {}",
            self.write_to_file.to_string_lossy()
        );

        Ok(())
    }
}
