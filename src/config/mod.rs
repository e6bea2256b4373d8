// SPDX-License-Identifier: MPL-2.0
//! This module loads the tool's per-user preferences from a `settings.toml`
//! file.
//!
//! Every field is optional; command-line flags take precedence over the file,
//! and the file takes precedence over [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use gen_thumb::config;
//!
//! let config = config::load().unwrap_or_default();
//! println!("thumbnails up to {} px", config.thumb_size());
//! ```

pub mod defaults;

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::{DEFAULT_THUMB_SIZE, DEFAULT_VIDEO_SEEK_SECS};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "GenThumb";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Maximum thumbnail edge in pixels.
    #[serde(default)]
    pub thumb_size: Option<u32>,
    /// Directory thumbnails are written to.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Timestamp, in seconds, of the frame taken from videos.
    #[serde(default)]
    pub video_seek_secs: Option<f64>,
}

impl Config {
    /// Thumbnail size, falling back to the default for missing or zero values.
    #[must_use]
    pub fn thumb_size(&self) -> NonZeroU32 {
        self.thumb_size
            .and_then(NonZeroU32::new)
            .or_else(|| NonZeroU32::new(DEFAULT_THUMB_SIZE))
            .unwrap_or(NonZeroU32::MIN)
    }

    /// Video seek offset, clamped to a sane range.
    #[must_use]
    pub fn video_seek(&self) -> Duration {
        let secs = self
            .video_seek_secs
            .filter(|s| s.is_finite())
            .unwrap_or(DEFAULT_VIDEO_SEEK_SECS)
            .clamp(0.0, defaults::MAX_VIDEO_SEEK_SECS);
        Duration::from_secs_f64(secs)
    }
}

/// Returns the path of the per-user settings file, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Loads a config file. Unparseable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            Ok(Config::default())
        }
    }
}
