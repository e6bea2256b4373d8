// SPDX-License-Identifier: MPL-2.0
//! Metadata reading port definition.
//!
//! Infrastructure adapters implement this trait using `kamadak-exif`,
//! `quick-xml` (XMP) and `FFmpeg` (container properties).
//!
//! # Supported Metadata Types
//!
//! - **EXIF/TIFF**: Capture date, orientation
//! - **XMP**: Rating and label
//! - **Container**: Duration, tracks, codec, frame rate, tags

use crate::domain::media::MediaKind;
use crate::domain::metadata::MetadataRecord;
use std::path::Path;

/// Port for reading descriptive metadata.
///
/// Reading never fails: a source that cannot be opened produces a smaller
/// (possibly empty) record.
pub trait MetadataReader {
    /// Reads whatever metadata `path` exposes for its `kind`.
    fn read_metadata(&self, path: &Path, kind: MediaKind) -> MetadataRecord;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::MetadataValue;

    fn _assert_object_safe(_: &dyn MetadataReader) {}

    struct FixedReader;

    impl MetadataReader for FixedReader {
        fn read_metadata(&self, _path: &Path, kind: MediaKind) -> MetadataRecord {
            let mut record = MetadataRecord::new();
            if kind == MediaKind::Image {
                record.insert("rating", MetadataValue::Absent);
            }
            record
        }
    }

    #[test]
    fn reader_shapes_record_per_kind() {
        let reader = FixedReader;
        assert_eq!(reader.read_metadata(Path::new("a.jpg"), MediaKind::Image).len(), 1);
        assert!(reader
            .read_metadata(Path::new("a.mov"), MediaKind::Video)
            .is_empty());
    }
}
