// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, so the thumbnail generator and the
//! driver can be exercised with in-memory fakes.
//!
//! # Available Ports
//!
//! - [`image`]: Still image decoding ([`ImageDecoder`])
//! - [`video`]: Single frame extraction ([`VideoFrameExtractor`])
//! - [`metadata`]: Descriptive metadata reading ([`MetadataReader`])
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `FFmpeg` or `image` crate types)
//! - Calls are synchronous and single-shot; there is no decoder state to manage
//! - Decoding ports return [`DecodeError`](crate::domain::error::DecodeError);
//!   the metadata port cannot fail

pub mod image;
pub mod metadata;
pub mod video;

// Re-export main types for convenience
pub use image::ImageDecoder;
pub use metadata::MetadataReader;
pub use video::VideoFrameExtractor;
