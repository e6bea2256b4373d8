// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides error types that are independent of the concrete
//! decoding libraries.

mod decode;

pub use decode::DecodeError;
