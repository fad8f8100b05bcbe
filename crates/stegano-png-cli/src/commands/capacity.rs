use std::path::PathBuf;

use clap::Args;
use stegano_png::CodecOptions;

use crate::CliResult;

/// Prints how many characters fit into a PNG image
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// PNG image to inspect
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let bytes = stegano_png::commands::capacity(&self.media, &options)?;
        println!("{bytes}");

        Ok(())
    }
}
