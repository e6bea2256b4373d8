// SPDX-License-Identifier: MPL-2.0
//! JPEG thumbnail generation from images and video frames.
//!
//! The generator knows nothing about codecs: it asks an [`ImageDecoder`] or a
//! [`VideoFrameExtractor`] for upright pixels, fits them into the requested
//! square and encodes the result.

use crate::application::port::{ImageDecoder, VideoFrameExtractor};
use crate::config::defaults::DEFAULT_VIDEO_SEEK_SECS;
use crate::domain::media::MediaKind;
use crate::error::{Error, Result};
use crate::media::image::{encode_jpeg, fit_within, from_raw_image};
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

/// Produces encoded JPEG thumbnails.
pub struct ThumbnailGenerator {
    images: Box<dyn ImageDecoder>,
    videos: Box<dyn VideoFrameExtractor>,
    video_seek: Duration,
}

impl std::fmt::Debug for ThumbnailGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailGenerator")
            .field("video_seek", &self.video_seek)
            .finish_non_exhaustive()
    }
}

impl ThumbnailGenerator {
    /// Creates a generator that takes video frames at the default offset.
    #[must_use]
    pub fn new(images: Box<dyn ImageDecoder>, videos: Box<dyn VideoFrameExtractor>) -> Self {
        Self {
            images,
            videos,
            video_seek: Duration::from_secs_f64(DEFAULT_VIDEO_SEEK_SECS),
        }
    }

    /// Sets the presentation timestamp used for video thumbnails.
    #[must_use]
    pub fn with_video_seek(mut self, video_seek: Duration) -> Self {
        self.video_seek = video_seek;
        self
    }

    #[must_use]
    pub fn video_seek(&self) -> Duration {
        self.video_seek
    }

    /// Generates a JPEG thumbnail whose longest edge is at most `target_size`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFileType`] for [`MediaKind::Unsupported`]
    /// - [`Error::Decode`] when decoding or encoding fails
    pub fn generate(
        &self,
        path: &Path,
        kind: MediaKind,
        target_size: NonZeroU32,
    ) -> Result<Vec<u8>> {
        let raw = match kind {
            MediaKind::Image => self.images.decode(path, target_size)?,
            MediaKind::Video => self.videos.extract_frame(path, self.video_seek, target_size)?,
            MediaKind::Unsupported => return Err(Error::UnsupportedFileType(path.to_path_buf())),
        };

        let source_size = (raw.width(), raw.height());
        let thumbnail = fit_within(from_raw_image(raw)?, target_size.get());
        tracing::debug!(
            path = %path.display(),
            %kind,
            source = ?source_size,
            thumbnail = ?(thumbnail.width(), thumbnail.height()),
            "encoding thumbnail"
        );

        Ok(encode_jpeg(&thumbnail)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DecodeError;
    use crate::domain::media::RawImage;
    use std::cell::Cell;
    use std::rc::Rc;

    struct SolidDecoder {
        width: u32,
        height: u32,
    }

    impl ImageDecoder for SolidDecoder {
        fn decode(
            &self,
            _path: &Path,
            _max_edge: NonZeroU32,
        ) -> std::result::Result<RawImage, DecodeError> {
            let len = (self.width * self.height * 4) as usize;
            Ok(RawImage::from_rgba(self.width, self.height, vec![200u8; len]))
        }
    }

    struct FailingDecoder;

    impl ImageDecoder for FailingDecoder {
        fn decode(
            &self,
            _path: &Path,
            _max_edge: NonZeroU32,
        ) -> std::result::Result<RawImage, DecodeError> {
            Err(DecodeError::CorruptedFile)
        }
    }

    struct RecordingExtractor {
        requested: Rc<Cell<Option<Duration>>>,
    }

    impl VideoFrameExtractor for RecordingExtractor {
        fn extract_frame(
            &self,
            _path: &Path,
            at: Duration,
            _max_edge: NonZeroU32,
        ) -> std::result::Result<RawImage, DecodeError> {
            self.requested.set(Some(at));
            Ok(RawImage::from_rgba(1080, 1920, vec![90u8; 1080 * 1920 * 4]))
        }
    }

    struct NoFrameExtractor;

    impl VideoFrameExtractor for NoFrameExtractor {
        fn extract_frame(
            &self,
            _path: &Path,
            _at: Duration,
            _max_edge: NonZeroU32,
        ) -> std::result::Result<RawImage, DecodeError> {
            Err(DecodeError::NoFrame)
        }
    }

    fn size(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("non-zero")
    }

    fn decoded(bytes: &[u8]) -> image_rs::DynamicImage {
        image_rs::load_from_memory(bytes).expect("valid jpeg")
    }

    #[test]
    fn image_thumbnail_fits_target() {
        let generator = ThumbnailGenerator::new(
            Box::new(SolidDecoder {
                width: 1000,
                height: 1000,
            }),
            Box::new(NoFrameExtractor),
        );

        let bytes = generator
            .generate(Path::new("big.png"), MediaKind::Image, size(200))
            .expect("thumbnail");
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let image = decoded(&bytes);
        assert!(image.width().max(image.height()) <= 200);
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let generator = ThumbnailGenerator::new(
            Box::new(SolidDecoder {
                width: 50,
                height: 20,
            }),
            Box::new(NoFrameExtractor),
        );

        let bytes = generator
            .generate(Path::new("icon.png"), MediaKind::Image, size(200))
            .expect("thumbnail");
        let image = decoded(&bytes);
        assert_eq!((image.width(), image.height()), (50, 20));
    }

    #[test]
    fn video_uses_configured_seek_and_keeps_portrait() {
        let requested = Rc::new(Cell::new(None));
        let generator = ThumbnailGenerator::new(
            Box::new(FailingDecoder),
            Box::new(RecordingExtractor {
                requested: Rc::clone(&requested),
            }),
        );
        assert_eq!(generator.video_seek(), Duration::from_secs(1));

        let bytes = generator
            .generate(Path::new("portrait.mov"), MediaKind::Video, size(200))
            .expect("thumbnail");
        assert_eq!(requested.get(), Some(Duration::from_secs(1)));

        let image = decoded(&bytes);
        assert_eq!(image.height(), 200);
        assert!(image.width() < image.height());

        let generator = generator.with_video_seek(Duration::from_millis(2500));
        generator
            .generate(Path::new("portrait.mov"), MediaKind::Video, size(64))
            .expect("thumbnail");
        assert_eq!(requested.get(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn decode_failures_are_decode_errors() {
        let generator =
            ThumbnailGenerator::new(Box::new(FailingDecoder), Box::new(NoFrameExtractor));

        assert!(matches!(
            generator.generate(Path::new("bad.jpg"), MediaKind::Image, size(200)),
            Err(Error::Decode(DecodeError::CorruptedFile))
        ));
        assert!(matches!(
            generator.generate(Path::new("bad.mp4"), MediaKind::Video, size(200)),
            Err(Error::Decode(DecodeError::NoFrame))
        ));
    }

    #[test]
    fn unsupported_kind_is_rejected() {
        let generator =
            ThumbnailGenerator::new(Box::new(FailingDecoder), Box::new(NoFrameExtractor));
        match generator.generate(Path::new("notes.txt"), MediaKind::Unsupported, size(200)) {
            Err(Error::UnsupportedFileType(path)) => assert_eq!(path, Path::new("notes.txt")),
            other => panic!("expected UnsupportedFileType, got {other:?}"),
        }
    }
}
