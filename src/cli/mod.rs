//! CLI module for the honeypot generator
//!
//! This module handles command-line argument parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

pub mod args;

pub use args::LogFormat;

/// Long flags that are also accepted with a single leading dash.
///
/// Each takes an optional `=BOOL` value, so `-skip_silence=false` works too.
const SINGLE_DASH_FLAGS: &[&str] = &[
    "skip_visual_ad",
    "skip_audio_ad",
    "skip_silence",
    "skip_desync",
];

/// Honeypot segment generator
///
/// Cuts a random segment out of every input file and injects a defect into
/// it: a visual ad overlay, an audio ad mix, a silence window, or an
/// audio/video desync. One output file per defect is written next to the input.
#[derive(Parser, Debug)]
#[command(name = "honeypot")]
#[command(about = "Generate QA honeypot segments from video files")]
#[command(version)]
#[command(override_usage = "honeypot [options] [file1 file2 ...]")]
pub struct Cli {
    /// Duration of the output segments in seconds, must be at least 11 seconds [default: 120]
    #[arg(short = 'd', value_name = "SECONDS", env = "HONEYPOT_SEGMENT_DURATION", allow_negative_numbers = true)]
    pub segment_duration: Option<f64>,

    /// Do not create visual ad segment
    #[arg(long = "skip_visual_ad", value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1,
          require_equals = true, default_value_t = false, default_missing_value = "true",
          value_parser = BoolishValueParser::new())]
    pub skip_visual_ad: bool,

    /// Do not create audio ad segment
    #[arg(long = "skip_audio_ad", value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1,
          require_equals = true, default_value_t = false, default_missing_value = "true",
          value_parser = BoolishValueParser::new())]
    pub skip_audio_ad: bool,

    /// Do not create silence segment
    #[arg(long = "skip_silence", value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1,
          require_equals = true, default_value_t = false, default_missing_value = "true",
          value_parser = BoolishValueParser::new())]
    pub skip_silence: bool,

    /// Do not create desync segment
    #[arg(long = "skip_desync", value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1,
          require_equals = true, default_value_t = false, default_missing_value = "true",
          value_parser = BoolishValueParser::new())]
    pub skip_desync: bool,

    #[command(flatten)]
    pub options: args::RunArgs,

    /// Input video files
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Rewrite `-skip_*` flags to their `--skip_*` form so clap accepts both.
///
/// Anything after a bare `--` is passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut positional_only = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if positional_only {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                positional_only = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or(rest);
                    if SINGLE_DASH_FLAGS.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
