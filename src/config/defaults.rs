// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate.

// ==========================================================================
// Thumbnail Defaults
// ==========================================================================

/// Default maximum thumbnail edge, in pixels.
pub const DEFAULT_THUMB_SIZE: u32 = 200;

// ==========================================================================
// Video Defaults
// ==========================================================================

/// Presentation timestamp the video frame is taken from, in seconds.
pub const DEFAULT_VIDEO_SEEK_SECS: f64 = 1.0;

/// Upper bound accepted for `video_seek_secs` from a config file.
pub const MAX_VIDEO_SEEK_SECS: f64 = 3600.0;

// ==========================================================================
// Output Defaults
// ==========================================================================

/// Extension of every generated thumbnail.
pub const THUMBNAIL_EXTENSION: &str = "jpg";

/// `chrono` format of the timestamp suffix appended to output names.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// `chrono` format used for EXIF-style timestamps (`YYYY:MM:DD HH:MM:SS`).
pub const EXIF_TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_default_within_bounds() {
        assert!(DEFAULT_VIDEO_SEEK_SECS >= 0.0);
        assert!(DEFAULT_VIDEO_SEEK_SECS <= MAX_VIDEO_SEEK_SECS);
    }

    #[test]
    fn thumb_size_is_positive() {
        assert!(DEFAULT_THUMB_SIZE > 0);
    }
}
