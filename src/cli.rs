// SPDX-License-Identifier: MPL-2.0
//! Command-line parsing and settings resolution.
//!
//! Precedence for every setting: command-line flag, then the config file,
//! then the built-in default.

use crate::config::{self, Config};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

pub const USAGE: &str = "\
Usage: gen-thumb [OPTIONS] [file1] [file2] ...

Options:
  --thumbsize=<n>     Longest thumbnail edge in pixels (default: 200)
  --output-dir=<dir>  Directory thumbnails are written to (default: current directory)
  --config=<file>     Settings file to use instead of the per-user one
  -h, --help          Print this help
  -V, --version       Print the version";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Run(CliArgs),
}

/// Flags and input paths of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub thumb_size: Option<NonZeroU32>,
    pub output_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub paths: Vec<PathBuf>,
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub thumb_size: NonZeroU32,
    pub output_dir: PathBuf,
    pub video_seek: Duration,
}

fn parse_thumb_size(value: &str) -> std::result::Result<NonZeroU32, String> {
    value
        .parse::<u32>()
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| format!("expected a positive integer, got '{value}'"))
}

fn usage_error(err: pico_args::Error) -> Error {
    Error::Usage(err.to_string())
}

fn parse_args(mut args: pico_args::Arguments) -> Result<Command> {
    if args.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }
    if args.contains(["-V", "--version"]) {
        return Ok(Command::Version);
    }

    let thumb_size = args
        .opt_value_from_fn("--thumbsize", parse_thumb_size)
        .map_err(usage_error)?;
    let output_dir = args
        .opt_value_from_str::<_, PathBuf>("--output-dir")
        .map_err(usage_error)?;
    let config_path = args
        .opt_value_from_str::<_, PathBuf>("--config")
        .map_err(usage_error)?;

    let mut paths = Vec::new();
    for arg in args.finish() {
        if arg.to_string_lossy().starts_with("--") {
            return Err(Error::Usage(format!(
                "unknown option '{}'",
                arg.to_string_lossy()
            )));
        }
        paths.push(PathBuf::from(arg));
    }

    Ok(Command::Run(CliArgs {
        thumb_size,
        output_dir,
        config_path,
        paths,
    }))
}

/// Parses an argument list that excludes the program name.
///
/// # Errors
///
/// Returns [`Error::Usage`] for invalid flag values and unknown flags.
pub fn parse_from<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    parse_args(pico_args::Arguments::from_vec(
        args.into_iter().map(Into::into).collect(),
    ))
}

impl CliArgs {
    /// Loads the config file named by `--config`, or the per-user one.
    ///
    /// A missing per-user file is not an error; a missing `--config` file is.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named config file cannot be read.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config_path {
            Some(path) => config::load_from_path(path).map_err(|e| {
                Error::Config(format!("cannot read {}: {e}", path.display()))
            }),
            None => Ok(config::load().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable settings file");
                Config::default()
            })),
        }
    }

    /// Merges the flags over `config`.
    #[must_use]
    pub fn resolve(&self, config: &Config) -> Settings {
        Settings {
            thumb_size: self.thumb_size.unwrap_or_else(|| config.thumb_size()),
            output_dir: self
                .output_dir
                .clone()
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            video_seek: config.video_seek(),
        }
    }
}
