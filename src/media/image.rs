// SPDX-License-Identifier: MPL-2.0
//! Still image decoding with orientation correction.
//!
//! JPEG, PNG and TIFF are decoded by the `image` crate. Raw camera files and
//! PSD documents go through their largest embedded JPEG preview, which is also
//! the fallback when a TIFF uses a compression the decoder does not handle.

use crate::domain::error::DecodeError;
use crate::domain::media::{Orientation, RawImage};
use crate::media::exif_source::ExifTags;
use crate::media::{embedded_preview, extensions, lowercase_extension};
use exif::Tag;
use image_rs::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Decodes `path` into upright pixels.
///
/// # Errors
///
/// Returns a [`DecodeError`] when neither a full decode nor an embedded
/// preview produces an image.
pub fn load_upright<P: AsRef<Path>>(path: P) -> Result<DynamicImage, DecodeError> {
    let path = path.as_ref();
    let extension = lowercase_extension(path);

    let image = if extensions::is_native_image(&extension) {
        match decode_native(path) {
            Ok(image) => image,
            Err(err) if extension.starts_with("tif") => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "full TIFF decode failed, trying embedded preview"
                );
                decode_embedded_preview(path).map_err(|_| err)?
            }
            Err(err) => return Err(err),
        }
    } else {
        decode_embedded_preview(path)?
    };

    let orientation = read_orientation(path);
    tracing::trace!(path = %path.display(), %orientation, "applying orientation");
    Ok(apply_orientation(image, orientation))
}

fn decode_native(path: &Path) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::open(path)
        .map_err(|e| DecodeError::Io(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;
    Ok(reader.decode()?)
}

fn decode_embedded_preview(path: &Path) -> Result<DynamicImage, DecodeError> {
    let previews =
        embedded_preview::embedded_jpegs(path).map_err(|e| DecodeError::Io(e.to_string()))?;

    for preview in &previews {
        match image_rs::load_from_memory_with_format(preview, ImageFormat::Jpeg) {
            Ok(image) => {
                tracing::debug!(
                    path = %path.display(),
                    width = image.width(),
                    height = image.height(),
                    "using embedded preview"
                );
                return Ok(image);
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable preview");
            }
        }
    }

    Err(DecodeError::NoFrame)
}

/// Reads the EXIF orientation of `path`, defaulting to upright.
#[must_use]
pub fn read_orientation<P: AsRef<Path>>(path: P) -> Orientation {
    ExifTags::read(path.as_ref())
        .and_then(|exif| exif.uint(Tag::Orientation))
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

/// Transforms stored pixels so they display upright.
#[must_use]
pub fn apply_orientation(image: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => image,
        Orientation::CW90 => image.rotate90(),
        Orientation::CW180 => image.rotate180(),
        Orientation::CW270 => image.rotate270(),
        Orientation::MirroredVertical => image.flipv(),
        Orientation::MirroredHorizontal => image.fliph(),
        Orientation::MirroredHorizontalAnd90CW => image.fliph().rotate90(),
        Orientation::MirroredHorizontalAnd270CW => image.fliph().rotate270(),
    }
}

/// Shrinks `image` to fit a `max_edge` square. Smaller images are returned as is.
#[must_use]
pub fn fit_within(image: DynamicImage, max_edge: u32) -> DynamicImage {
    if image.width().max(image.height()) <= max_edge {
        return image;
    }
    image.thumbnail(max_edge, max_edge)
}

/// Encodes `image` as a baseline JPEG at the encoder's default quality.
///
/// The alpha channel is dropped first.
///
/// # Errors
///
/// Returns [`DecodeError::Encode`] if the encoder rejects the pixels.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, DecodeError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| DecodeError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Converts decoded pixels to the library-neutral [`RawImage`].
#[must_use]
pub fn to_raw_image(image: &DynamicImage) -> RawImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    RawImage::from_rgba(width, height, rgba.into_raw())
}

/// Wraps a [`RawImage`] back into a [`DynamicImage`].
///
/// # Errors
///
/// Returns [`DecodeError::DecodingFailed`] if the buffer does not match the
/// dimensions.
pub fn from_raw_image(image: RawImage) -> Result<DynamicImage, DecodeError> {
    let (width, height) = (image.width(), image.height());
    RgbaImage::from_raw(width, height, image.into_rgba_bytes())
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| {
            DecodeError::DecodingFailed(format!("pixel buffer does not match {width}x{height}"))
        })
}
