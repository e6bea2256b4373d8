// SPDX-License-Identifier: MPL-2.0
use crate::domain::error::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Extension not recognized; the driver skips the file.
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFileType(PathBuf),

    #[error("Decode Error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Write Error: {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Usage Error: {0}")]
    Usage(String),
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(DecodeError::from(err))
    }
}

impl From<image_rs::ImageError> for DecodeError {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
            image_rs::ImageError::IoError(e) => DecodeError::Io(e.to_string()),
            image_rs::ImageError::Encoding(e) => DecodeError::Encode(e.to_string()),
            other => DecodeError::from_message(&other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
