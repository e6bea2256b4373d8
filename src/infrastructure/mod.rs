// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`, wrapping `FFmpeg`, the `image` crate and the metadata
//! readers.
//!
//! # Available Adapters
//!
//! - [`ffmpeg`]: Video frame extraction (implements [`VideoFrameExtractor`])
//! - [`image_rs`]: Still image decoding (implements [`ImageDecoder`])
//! - [`metadata`]: EXIF, XMP and container metadata (implements [`MetadataReader`])
//!
//! [`VideoFrameExtractor`]: crate::application::port::VideoFrameExtractor
//! [`ImageDecoder`]: crate::application::port::ImageDecoder
//! [`MetadataReader`]: crate::application::port::MetadataReader

pub mod ffmpeg;
pub mod image_rs;
pub mod metadata;

pub use self::ffmpeg::FfmpegFrameExtractor;
pub use self::image_rs::ImageRsDecoder;
pub use self::metadata::MediaMetadataReader;
