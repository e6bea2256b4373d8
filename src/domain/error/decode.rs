// SPDX-License-Identifier: MPL-2.0
//! Errors raised while turning a source file into a thumbnail.

use thiserror::Error;

/// Specific reasons a source could not be decoded into a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The container or codec inside a recognized extension is not supported
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// File appears corrupted or has invalid data
    #[error("File is corrupted or truncated")]
    CorruptedFile,

    /// File exists but contains no video stream
    #[error("No video stream found")]
    NoVideoStream,

    /// The stream was readable but no frame (or embedded preview) came out of it
    #[error("No frame could be decoded")]
    NoFrame,

    /// Decoding failed part way through
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),

    /// The decoded pixels could not be re-encoded as JPEG
    #[error("JPEG encoding failed: {0}")]
    Encode(String),

    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(String),
}

impl DecodeError {
    /// Categorizes a raw decoder message.
    ///
    /// `FFmpeg` and the `image` crate only hand back strings for most failures;
    /// this maps them onto the closest variant.
    #[must_use]
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("i/o error")
        {
            return DecodeError::Io(msg.to_string());
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("no video track") {
            return DecodeError::NoVideoStream;
        }

        if msg_lower.contains("invalid data found")
            || msg_lower.contains("corrupt")
            || msg_lower.contains("truncated")
            || msg_lower.contains("malformed")
        {
            return DecodeError::CorruptedFile;
        }

        if msg_lower.contains("unsupported") || msg_lower.contains("not supported") {
            return DecodeError::UnsupportedFormat(msg.to_string());
        }

        DecodeError::DecodingFailed(msg.to_string())
    }
}
