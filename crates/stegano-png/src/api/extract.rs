use std::path::{Path, PathBuf};

use crate::{commands, CodecOptions, SteganoError};

pub fn prepare() -> ExtractApi {
    ExtractApi::default()
}

#[derive(Default, Debug)]
pub struct ExtractApi {
    secret_image: Option<PathBuf>,
    options: CodecOptions,
}

impl ExtractApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the message to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and return the hidden text
    pub fn execute(self) -> Result<String, SteganoError> {
        let Some(secret_image) = self.secret_image else {
            return Err(SteganoError::CarrierNotSet);
        };

        commands::extract(&secret_image, &self.options)
    }
}
