// SPDX-License-Identifier: MPL-2.0
//! Adapter implementing the [`MetadataReader`] port on top of `kamadak-exif`,
//! `quick-xml` and `FFmpeg`.
//!
//! [`MetadataReader`]: crate::application::port::MetadataReader

use std::path::Path;

use crate::application::port::MetadataReader;
use crate::domain::media::MediaKind;
use crate::domain::metadata::MetadataRecord;
use crate::media;

#[derive(Debug, Clone, Copy, Default)]
pub struct MediaMetadataReader;

impl MetadataReader for MediaMetadataReader {
    fn read_metadata(&self, path: &Path, kind: MediaKind) -> MetadataRecord {
        media::read_metadata(path, kind)
    }
}
