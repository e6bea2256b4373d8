// SPDX-License-Identifier: MPL-2.0
//! Still image decoding port definition.

use crate::domain::error::DecodeError;
use crate::domain::media::RawImage;
use std::num::NonZeroU32;
use std::path::Path;

/// Port for decoding a still image into upright pixels.
///
/// Implementations apply the stored orientation (EXIF `Orientation`) before
/// returning, so callers never rotate. They may return an image larger than
/// `max_edge` (the thumbnail generator performs the final fit), but should
/// use the hint to pick a cheaper representation such as an embedded preview.
pub trait ImageDecoder {
    /// Decodes `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the container cannot be read or no
    /// representation of the image can be produced.
    fn decode(&self, path: &Path, max_edge: NonZeroU32) -> Result<RawImage, DecodeError>;
}
