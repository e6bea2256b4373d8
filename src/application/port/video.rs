// SPDX-License-Identifier: MPL-2.0
//! Video frame extraction port definition.
//!
//! This module defines the [`VideoFrameExtractor`] trait. The `FFmpeg`
//! adapter in `infrastructure::ffmpeg` implements it.
//!
//! # Design Notes
//!
//! - Extraction is **stateless**: each call opens, seeks, decodes and closes
//! - Uses domain types only (`RawImage`, `DecodeError`)

use crate::domain::error::DecodeError;
use crate::domain::media::RawImage;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

// =============================================================================
// VideoFrameExtractor Trait
// =============================================================================

/// Port for pulling a single still frame out of a video.
///
/// # Contract
///
/// - The frame returned is the one displayed at `at`, or the closest frame
///   before it. When `at` lies past the end of the stream, the last decodable
///   frame is returned.
/// - The stream's display transform (rotation, mirroring) is already applied,
///   so a portrait recording yields a portrait frame.
/// - Implementations may downscale towards `max_edge`, but callers must not
///   rely on it.
///
/// # Example
///
/// ```ignore
/// use gen_thumb::application::port::VideoFrameExtractor;
/// use std::time::Duration;
///
/// fn poster(extractor: &impl VideoFrameExtractor, path: &Path, size: NonZeroU32) {
///     match extractor.extract_frame(path, Duration::from_secs(1), size) {
///         Ok(frame) => println!("Frame: {}x{}", frame.width(), frame.height()),
///         Err(e) => eprintln!("Decode error: {e}"),
///     }
/// }
/// ```
pub trait VideoFrameExtractor {
    /// Extracts the frame presented at `at`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if:
    /// - The container cannot be opened
    /// - No video stream is found
    /// - No frame can be decoded at all
    fn extract_frame(
        &self,
        path: &Path,
        at: Duration,
        max_edge: NonZeroU32,
    ) -> Result<RawImage, DecodeError>;
}
