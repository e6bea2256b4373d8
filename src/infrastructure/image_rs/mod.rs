// SPDX-License-Identifier: MPL-2.0
//! `image` crate adapter implementing the [`ImageDecoder`] port trait.
//!
//! [`ImageDecoder`]: crate::application::port::ImageDecoder

use std::num::NonZeroU32;
use std::path::Path;

use crate::application::port::ImageDecoder;
use crate::domain::error::DecodeError;
use crate::domain::media::RawImage;
use crate::media::image;

/// Decodes JPEG, PNG and TIFF natively and raw/PSD files via embedded previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsDecoder;

impl ImageRsDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for ImageRsDecoder {
    fn decode(&self, path: &Path, max_edge: NonZeroU32) -> Result<RawImage, DecodeError> {
        let upright = image::load_upright(path)?;
        // Shrink before leaving the adapter so large photos are not copied at
        // full resolution.
        let fitted = image::fit_within(upright, max_edge.get());
        Ok(image::to_raw_image(&fitted))
    }
}
