use clap::{Parser, Subcommand, ValueEnum};
use stegano_png::{CodecOptions, CompressionLevel};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Skip the checksum verification of the carrier records
    #[arg(long = "no-verify-checksums", global = true)]
    pub no_verify_checksums: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions::default().with_verify_checksums(!self.no_verify_checksums)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum Compression {
    Fast,
    #[default]
    Default,
    Best,
}

impl From<Compression> for CompressionLevel {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Fast => CompressionLevel::Fast,
            Compression::Default => CompressionLevel::Default,
            Compression::Best => CompressionLevel::Best,
        }
    }
}
