// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core types shared by every component.
//!
//! This module contains value objects and pure rules. It does not touch the
//! filesystem, `FFmpeg` or the `image` crate, which keeps it testable in
//! isolation.
//!
//! # Modules
//!
//! - [`error`]: Decoding error kinds ([`DecodeError`](error::DecodeError))
//! - [`media`]: Media types ([`MediaKind`](media::MediaKind), [`RawImage`](media::RawImage),
//!   [`Orientation`](media::Orientation), [`ThumbnailRequest`](media::ThumbnailRequest))
//! - [`metadata`]: Metadata types ([`MetadataRecord`](metadata::MetadataRecord),
//!   [`MetadataValue`](metadata::MetadataValue), [`FourCc`](metadata::FourCc))

pub mod error;
pub mod media;
pub mod metadata;
