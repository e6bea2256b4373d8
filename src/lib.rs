// SPDX-License-Identifier: MPL-2.0
//! `gen_thumb` generates JPEG thumbnails for photos, raw camera files and
//! videos, and reports their metadata.
//!
//! Images are decoded with the `image` crate (raw and PSD files through their
//! embedded previews), videos with `FFmpeg`. EXIF orientation and video display
//! matrices are honoured so thumbnails come out upright.

#![doc(html_root_url = "https://docs.rs/gen_thumb/0.1.0")]

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod driver;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod media;
pub mod output;

#[cfg(test)]
pub(crate) mod test_utils;
