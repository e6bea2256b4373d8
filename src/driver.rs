// SPDX-License-Identifier: MPL-2.0
//! Sequential processing of input files and the per-file report.
//!
//! For each path the driver classifies the file, generates and saves the
//! thumbnail, reads its metadata and prints one report block. Failures are
//! printed and processing moves on to the next file.

use crate::application::port::MetadataReader;
use crate::domain::media::ThumbnailRequest;
use crate::domain::metadata::MetadataRecord;
use crate::error::{Error, Result};
use crate::infrastructure::{FfmpegFrameExtractor, ImageRsDecoder, MediaMetadataReader};
use crate::media::{self, ThumbnailGenerator};
use crate::output;
use std::fs;
use std::io::{self, Write};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of one successfully processed file.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailResult {
    /// Name of the written thumbnail file.
    pub file_name: String,
    /// Full path of the written thumbnail file.
    pub output_path: PathBuf,
    /// Size of the encoded thumbnail in bytes.
    pub encoded_len: usize,
    /// Size of the source file in bytes (0 if it could not be read).
    pub source_size: u64,
    /// Time spent generating and saving the thumbnail.
    pub elapsed: Duration,
    pub metadata: MetadataRecord,
}

impl ThumbnailResult {
    /// Writes the success line and the metadata lines.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "✅ {} | Size: {} KB | Time: {:.2} ms",
            self.file_name,
            self.source_size / 1024,
            self.elapsed.as_secs_f64() * 1000.0
        )?;
        for (key, value) in &self.metadata {
            writeln!(out, "   {key}: {value}")?;
        }
        Ok(())
    }
}

/// Runs thumbnail generation over a list of files.
pub struct Driver {
    generator: ThumbnailGenerator,
    metadata: Box<dyn MetadataReader>,
    target_size: NonZeroU32,
    output_dir: PathBuf,
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("generator", &self.generator)
            .field("target_size", &self.target_size)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl Driver {
    #[must_use]
    pub fn new(
        generator: ThumbnailGenerator,
        metadata: Box<dyn MetadataReader>,
        target_size: NonZeroU32,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            generator,
            metadata,
            target_size,
            output_dir: output_dir.into(),
        }
    }

    /// Creates a driver backed by the `FFmpeg` and `image` adapters.
    #[must_use]
    pub fn with_default_adapters(
        target_size: NonZeroU32,
        output_dir: impl Into<PathBuf>,
        video_seek: Duration,
    ) -> Self {
        let generator = ThumbnailGenerator::new(
            Box::new(ImageRsDecoder::new()),
            Box::new(FfmpegFrameExtractor::new()),
        )
        .with_video_seek(video_seek);
        Self::new(
            generator,
            Box::new(MediaMetadataReader),
            target_size,
            output_dir,
        )
    }

    /// Builds the request for one input path.
    #[must_use]
    pub fn request_for(&self, path: &Path) -> ThumbnailRequest {
        ThumbnailRequest::new(path, self.target_size, &self.output_dir)
    }

    /// Generates, saves and describes the thumbnail for one request.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFileType`] if the extension is not recognized
    /// - [`Error::Decode`] if no thumbnail can be produced
    /// - [`Error::Write`] if the thumbnail cannot be saved
    pub fn process(&self, request: &ThumbnailRequest) -> Result<ThumbnailResult> {
        let source = request.source.as_path();
        let kind = media::classify(source);
        if !kind.is_supported() {
            return Err(Error::UnsupportedFileType(request.source.clone()));
        }

        let start = Instant::now();
        let source_size = fs::metadata(source).map(|m| m.len()).unwrap_or(0);

        let span = tracing::debug_span!("thumbnail", path = %source.display(), %kind);
        let _guard = span.enter();

        let bytes = self.generator.generate(source, kind, request.target_size)?;
        let file_name = output::save(&bytes, source, &request.output_dir)?;
        let elapsed = start.elapsed();

        let metadata = self.metadata.read_metadata(source, kind);
        tracing::info!(file = %file_name, bytes = bytes.len(), ?elapsed, "thumbnail generated");

        Ok(ThumbnailResult {
            output_path: request.output_dir.join(&file_name),
            file_name,
            encoded_len: bytes.len(),
            source_size,
            elapsed,
            metadata,
        })
    }

    /// Processes every path in order, reporting to `out`.
    ///
    /// Returns the number of thumbnails generated.
    ///
    /// # Errors
    ///
    /// Only errors writing to `out` are returned; per-file failures are
    /// reported and skipped.
    pub fn run<W: Write, P: AsRef<Path>>(&self, paths: &[P], out: &mut W) -> io::Result<usize> {
        let mut total = 0;

        for path in paths {
            let path = path.as_ref();
            match self.process(&self.request_for(path)) {
                Ok(result) => {
                    result.report(out)?;
                    total += 1;
                }
                Err(Error::UnsupportedFileType(_)) => {
                    writeln!(out, "⚠️ Skipped unsupported file: {}", path.display())?;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "thumbnail failed");
                    writeln!(out, "❌ Error processing {}: {e}", path.display())?;
                }
            }
        }

        writeln!(out, "🎉 Done. Total thumbnails generated: {total}")?;
        Ok(total)
    }
}
