// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains core media types that are independent of any
//! decoding library.

pub mod orientation;
pub mod types;

// Re-export commonly used types
pub use orientation::Orientation;
pub use types::{MediaKind, RawImage, ThumbnailRequest};
