// SPDX-License-Identifier: MPL-2.0
//! Application layer - capability interfaces.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - `media::thumbnail` and the driver consume ports, never concrete decoders
//!
//! # Example
//!
//! ```ignore
//! use gen_thumb::application::port::VideoFrameExtractor;
//!
//! // Infrastructure implements the port trait
//! struct FfmpegFrameExtractor;
//! impl VideoFrameExtractor for FfmpegFrameExtractor { /* ... */ }
//! ```

pub mod port;
