//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Log output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// Single-line text output
    Compact,
    /// JSON lines for structured logging
    Json,
}

/// Options beyond the segment flags
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// TOML configuration file
    #[arg(long, value_name = "PATH", env = "HONEYPOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for segment and defect placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log the ffmpeg commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// ffmpeg binary
    #[arg(long, value_name = "PATH", env = "HONEYPOT_FFMPEG")]
    pub ffmpeg: Option<String>,

    /// ffprobe binary
    #[arg(long, value_name = "PATH", env = "HONEYPOT_FFPROBE")]
    pub ffprobe: Option<String>,

    /// Visual ad overlay clip
    #[arg(long = "visual-ad", value_name = "PATH")]
    pub visual_ad: Option<PathBuf>,

    /// Audio ad clip
    #[arg(long = "audio-ad", value_name = "PATH")]
    pub audio_ad: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, env = "HONEYPOT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Logging output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}
