// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` adapter implementing the [`VideoFrameExtractor`] port trait.
//!
//! [`FfmpegFrameExtractor`] is stateless: every call opens the container,
//! seeks, decodes one frame and closes it again.
//!
//! [`VideoFrameExtractor`]: crate::application::port::VideoFrameExtractor

use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use crate::application::port::VideoFrameExtractor;
use crate::domain::error::DecodeError;
use crate::domain::media::RawImage;
use crate::media::video;

/// `FFmpeg`-based single frame extractor.
///
/// # Example
///
/// ```ignore
/// use gen_thumb::infrastructure::ffmpeg::FfmpegFrameExtractor;
/// use gen_thumb::application::port::VideoFrameExtractor;
///
/// let extractor = FfmpegFrameExtractor::new();
/// let frame = extractor.extract_frame(Path::new("clip.mp4"), Duration::from_secs(1), size)?;
/// println!("Frame: {}x{}", frame.width(), frame.height());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegFrameExtractor;

impl FfmpegFrameExtractor {
    /// Creates a new extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl VideoFrameExtractor for FfmpegFrameExtractor {
    fn extract_frame(
        &self,
        path: &Path,
        at: Duration,
        max_edge: NonZeroU32,
    ) -> Result<RawImage, DecodeError> {
        video::extract_frame(path, at, max_edge.get())
    }
}
