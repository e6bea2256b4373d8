// SPDX-License-Identifier: MPL-2.0
//! Media handling for images and videos.
//!
//! This module classifies sources, decodes them, reads their metadata and
//! turns them into JPEG thumbnails.

pub mod embedded_preview;
pub(crate) mod exif_source;
pub mod image;
pub mod metadata;
pub mod thumbnail;
pub mod video;
pub mod xmp;

use crate::domain::media::MediaKind;
use std::path::Path;

// Re-export commonly used types
pub use extensions::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
pub use metadata::read_metadata;
pub use thumbnail::ThumbnailGenerator;

/// Supported media extensions
pub mod extensions {
    /// Image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "tif", "tiff", "psd", "cr2", "cr3", "nef", "arw", "dng", "rw2",
    ];

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v"];

    /// Image extensions the `image` crate decodes natively.
    ///
    /// Everything else in [`IMAGE_EXTENSIONS`] (raw camera files, PSD) is
    /// thumbnailed from its embedded JPEG preview.
    pub const NATIVE_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff"];

    /// Extensions whose XMP packet lives in a JPEG APP1 segment.
    pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

    /// Returns `true` if the `image` crate can decode this extension directly.
    #[must_use]
    pub fn is_native_image(ext: &str) -> bool {
        NATIVE_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }

    /// Returns `true` for JPEG extensions.
    #[must_use]
    pub fn is_jpeg(ext: &str) -> bool {
        JPEG_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Returns the lowercased extension of `path`, or an empty string.
pub(crate) fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Classifies a file by its extension, case-insensitively.
///
/// Never touches the filesystem. Paths without an extension, or with one
/// that is not valid UTF-8, are [`MediaKind::Unsupported`].
#[must_use]
pub fn classify<P: AsRef<Path>>(path: P) -> MediaKind {
    let extension = lowercase_extension(path.as_ref());
    if extension.is_empty() {
        return MediaKind::Unsupported;
    }

    if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        MediaKind::Video
    } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        MediaKind::Image
    } else {
        MediaKind::Unsupported
    }
}
