// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! Extraction logic lives in `media::metadata` because it depends on
//! `kamadak-exif`, `quick-xml` and `ffmpeg-next`. This module only holds the
//! shapes it produces:
//! - [`MetadataValue`]: loosely-typed field value
//! - [`MetadataRecord`]: per-file mapping of field names to values
//! - [`FourCc`]: four-character codec tags

mod types;

pub use types::{FourCc, MetadataRecord, MetadataValue};
