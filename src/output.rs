// SPDX-License-Identifier: MPL-2.0
//! Writing encoded thumbnails to disk.
//!
//! Files are named `<source stem>_<yyyyMMdd-HHmmss>.jpg` using local time.
//! Two sources with the same stem processed within one second overwrite each
//! other.

use crate::config::defaults::{OUTPUT_TIMESTAMP_FORMAT, THUMBNAIL_EXTENSION};
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_STEM: &str = "thumbnail";

/// Builds the thumbnail file name for `source` at `time`.
#[must_use]
pub fn file_name_for(source: &Path, time: DateTime<Local>) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .filter(|s| !s.is_empty())
        .unwrap_or(FALLBACK_STEM.into());
    format!(
        "{stem}_{}.{THUMBNAIL_EXTENSION}",
        time.format(OUTPUT_TIMESTAMP_FORMAT)
    )
}

/// Writes `bytes` as the thumbnail of `source` inside `output_dir`.
///
/// Returns the generated file name.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be created or written.
pub fn save(bytes: &[u8], source: &Path, output_dir: &Path) -> Result<String> {
    let name = file_name_for(source, Local::now());
    let path = output_dir.join(&name);
    write_file(&path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "thumbnail written");
    Ok(name)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: PathBuf::from(path),
        source,
    })
}
