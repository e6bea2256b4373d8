// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.

use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// Classification of a source file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Still image (JPEG, PNG, TIFF, PSD, raw camera formats)
    Image,
    /// Video container (MP4, MOV, M4V)
    Video,
    /// Anything else; skipped by the driver
    Unsupported,
}

impl MediaKind {
    /// Returns `true` for kinds a thumbnail can be generated from.
    #[must_use]
    pub fn is_supported(self) -> bool {
        !matches!(self, MediaKind::Unsupported)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Raw decoded pixels, independent of any imaging library.
///
/// Decoders hand frames to the thumbnail generator as `RawImage` so the
/// generator can be exercised with synthetic frames.
///
/// # Example
///
/// ```
/// use gen_thumb::domain::media::RawImage;
///
/// let pixels = vec![255u8; 100 * 50 * 4]; // 100x50 RGBA
/// let image = RawImage::from_rgba(100, 50, pixels);
///
/// assert_eq!(image.width(), 100);
/// assert_eq!(image.longest_edge(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    rgba_bytes: Vec<u8>,
}

impl RawImage {
    /// Creates a new `RawImage` from dimensions and owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        let expected_len = (width as usize) * (height as usize) * 4;
        assert_eq!(
            rgba_bytes.len(),
            expected_len,
            "RGBA data length mismatch: expected {expected_len}, got {}",
            rgba_bytes.len()
        );

        Self {
            width,
            height,
            rgba_bytes,
        }
    }

    /// Returns the image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the larger of width and height.
    #[must_use]
    pub fn longest_edge(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Returns a reference to the RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Consumes the image and returns its pixel buffer.
    #[must_use]
    pub fn into_rgba_bytes(self) -> Vec<u8> {
        self.rgba_bytes
    }
}

/// One unit of work for the driver: a source file and where its thumbnail goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    /// File to thumbnail.
    pub source: PathBuf,
    /// Maximum thumbnail edge in pixels.
    pub target_size: NonZeroU32,
    /// Directory receiving the encoded JPEG.
    pub output_dir: PathBuf,
}

impl ThumbnailRequest {
    /// Creates a request for `source`.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, target_size: NonZeroU32, output_dir: &Path) -> Self {
        Self {
            source: source.into(),
            target_size,
            output_dir: output_dir.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_supported() {
        assert!(MediaKind::Image.is_supported());
        assert!(MediaKind::Video.is_supported());
        assert!(!MediaKind::Unsupported.is_supported());
    }

    #[test]
    fn media_kind_display() {
        assert_eq!(MediaKind::Image.to_string(), "image");
        assert_eq!(MediaKind::Unsupported.to_string(), "unsupported");
    }

    #[test]
    fn raw_image_creation() {
        let image = RawImage::from_rgba(10, 4, vec![0u8; 10 * 4 * 4]);
        assert_eq!(image.width(), 10);
        assert_eq!(image.height(), 4);
        assert_eq!(image.longest_edge(), 10);
        assert_eq!(image.rgba_bytes().len(), 160);
    }

    #[test]
    #[should_panic(expected = "RGBA data length mismatch")]
    fn raw_image_invalid_size() {
        let _ = RawImage::from_rgba(10, 10, vec![0u8; 100]);
    }

    #[test]
    fn raw_image_into_bytes_returns_same_buffer() {
        let pixels = vec![7u8; 8];
        let address = pixels.as_ptr();
        let bytes = RawImage::from_rgba(2, 1, pixels).into_rgba_bytes();
        assert_eq!(bytes, vec![7u8; 8]);
        assert_eq!(bytes.as_ptr(), address);
    }

    #[test]
    fn thumbnail_request_new() {
        let size = NonZeroU32::new(200).expect("non-zero");
        let request = ThumbnailRequest::new("a/b.jpg", size, Path::new("/tmp"));
        assert_eq!(request.source, PathBuf::from("a/b.jpg"));
        assert_eq!(request.target_size.get(), 200);
        assert_eq!(request.output_dir, PathBuf::from("/tmp"));
    }
}
