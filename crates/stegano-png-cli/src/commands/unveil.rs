use std::path::PathBuf;

use clap::Args;
use stegano_png::{CodecOptions, Framing};

use crate::CliResult;

/// Unveils a text message from a PNG image and prints it
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains the secret message
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// The message was hidden without length header and has this many bytes
    #[arg(long, value_name = "bytes")]
    pub unframed_length: Option<usize>,
}

impl UnveilArgs {
    pub fn codec_options(&self, options: CodecOptions) -> CodecOptions {
        match self.unframed_length {
            Some(len) => options.with_framing(Framing::Unframed {
                expected_len: Some(len),
            }),
            None => options,
        }
    }

    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let options = self.codec_options(options);
        let message = stegano_png::commands::extract(&self.media, &options)?;
        println!("{message}");

        Ok(())
    }
}
