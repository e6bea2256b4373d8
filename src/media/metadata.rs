// SPDX-License-Identifier: MPL-2.0
//! Media metadata extraction for images (EXIF, XMP) and videos (FFmpeg).
//!
//! Everything lands in a flat [`MetadataRecord`]; extraction never fails,
//! missing information simply leaves fields out (or `Absent`).

use crate::config::defaults::EXIF_TIMESTAMP_FORMAT;
use crate::domain::media::MediaKind;
use crate::domain::metadata::MetadataRecord;
use crate::media::exif_source::ExifTags;
use crate::media::{video, xmp};
use chrono::{DateTime, Local};
use exif::Tag;
use std::fs::{self, File};
use std::path::Path;

/// Reads the metadata of `path` according to its `kind`.
///
/// Unsupported files produce an empty record.
#[must_use]
pub fn read_metadata<P: AsRef<Path>>(path: P, kind: MediaKind) -> MetadataRecord {
    let path = path.as_ref();
    match kind {
        MediaKind::Image => read_image_metadata(path),
        MediaKind::Video => video::read_video_metadata(path),
        MediaKind::Unsupported => MetadataRecord::new(),
    }
}

/// Extract metadata from an image file.
///
/// Fields:
/// - `creation_date`: EXIF `DateTimeOriginal`, then `DateTime`, then the
///   filesystem creation (or modification) time
/// - `rating`, `label`: XMP, `Absent` when there is no packet
/// - `orientation`: EXIF orientation (1-8)
/// - `width`, `height`: from the image header, else from EXIF
///
/// A file that cannot be opened yields an empty record.
#[must_use]
pub fn read_image_metadata<P: AsRef<Path>>(path: P) -> MetadataRecord {
    let path = path.as_ref();
    let mut record = MetadataRecord::new();

    if let Err(e) = File::open(path) {
        tracing::debug!(path = %path.display(), error = %e, "cannot open image for metadata");
        return record;
    }

    let exif = ExifTags::read(path);

    let creation_date = exif
        .as_ref()
        .and_then(exif_creation_date)
        .or_else(|| filesystem_creation_date(path));
    record.insert("creation_date", creation_date);

    let summary = xmp::read_xmp(path).unwrap_or_default();
    record.insert("rating", summary.rating);
    record.insert("label", summary.label);

    if let Some(exif) = &exif {
        record.insert_some("orientation", exif.uint(Tag::Orientation));
    }

    let (width, height) = match image_rs::image_dimensions(path) {
        Ok((w, h)) => (Some(w), Some(h)),
        Err(_) => exif.as_ref().map_or((None, None), |exif| {
            (
                exif.uint(Tag::PixelXDimension)
                    .or_else(|| exif.uint(Tag::ImageWidth)),
                exif.uint(Tag::PixelYDimension)
                    .or_else(|| exif.uint(Tag::ImageLength)),
            )
        }),
    };
    record.insert_some("width", width);
    record.insert_some("height", height);

    record
}

/// Capture date as stored in EXIF, preferring `DateTimeOriginal`.
fn exif_creation_date(exif: &ExifTags) -> Option<String> {
    [Tag::DateTimeOriginal, Tag::DateTime]
        .into_iter()
        .find_map(|tag| exif.text(tag))
}

/// Birth time of the file (modification time where unavailable) in local time.
fn filesystem_creation_date(path: &Path) -> Option<String> {
    let metadata = fs::metadata(path).ok()?;
    let time = metadata.created().or_else(|_| metadata.modified()).ok()?;
    Some(format_local(DateTime::<Local>::from(time)))
}

pub(crate) fn format_local(time: DateTime<Local>) -> String {
    time.format(EXIF_TIMESTAMP_FORMAT).to_string()
}
