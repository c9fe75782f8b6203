//! Configuration hierarchy: CLI > environment > config file > defaults
//!
//! Environment overrides are resolved by clap together with the CLI flags,
//! so by the time [`RunSettings::resolve`] runs an `Option` on [`Cli`] that is
//! `Some` always wins over the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::adapters::exec_ffmpeg::DEFAULT_FFMPEG;
use crate::adapters::probe_ffprobe::DEFAULT_FFPROBE;
use crate::cli::{Cli, LogFormat};
use crate::domain::model::{
    DefectAsset, DefectAssets, DefectToggles, SegmentConfig, DEFAULT_SEGMENT_DURATION,
};
use crate::error::{HoneypotError, HoneypotResult};
use crate::ffmpeg::EncodingProfile;

/// Default logging level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `[honeypot]` table of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub segment_duration: Option<f64>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub visual_ad_path: Option<PathBuf>,
    pub visual_ad_duration: Option<f64>,
    pub audio_ad_path: Option<PathBuf>,
    pub audio_ad_duration: Option<f64>,
    pub log_level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    honeypot: FileConfig,
}

impl FileConfig {
    /// Parse TOML text
    pub fn from_toml(content: &str) -> HoneypotResult<Self> {
        let document: ConfigDocument = toml::from_str(content).map_err(|e| HoneypotError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })?;
        Ok(document.honeypot)
    }

    /// Load and parse a TOML file
    pub fn load(path: &Path) -> HoneypotResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HoneypotError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        info!("Loading configuration from: {}", path.display());
        Self::from_toml(&content)
    }
}

/// Everything a run needs, resolved once before any file is touched
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub segment: SegmentConfig,
    pub assets: DefectAssets,
    pub profile: EncodingProfile,
    pub ffmpeg: String,
    pub ffprobe: String,
    pub seed: Option<u64>,
    pub dry_run: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl RunSettings {
    /// Merge CLI/env values with the optional config file and validate
    pub fn resolve(cli: &Cli) -> HoneypotResult<Self> {
        let file = match &cli.options.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Merge CLI/env values over an already loaded file config
    pub fn merge(cli: &Cli, file: FileConfig) -> HoneypotResult<Self> {
        let opts = &cli.options;
        let defaults = DefectAssets::default();

        let toggles = DefectToggles {
            visual_ad: !cli.skip_visual_ad,
            audio_ad: !cli.skip_audio_ad,
            silence: !cli.skip_silence,
            desync: !cli.skip_desync,
        };
        let segment_duration = cli
            .segment_duration
            .or(file.segment_duration)
            .unwrap_or(DEFAULT_SEGMENT_DURATION);
        let segment = SegmentConfig::new(segment_duration, toggles)?;

        let assets = DefectAssets {
            visual_ad: DefectAsset::new(
                opts.visual_ad
                    .clone()
                    .or(file.visual_ad_path)
                    .unwrap_or(defaults.visual_ad.path),
                file.visual_ad_duration.unwrap_or(defaults.visual_ad.duration),
            ),
            audio_ad: DefectAsset::new(
                opts.audio_ad
                    .clone()
                    .or(file.audio_ad_path)
                    .unwrap_or(defaults.audio_ad.path),
                file.audio_ad_duration.unwrap_or(defaults.audio_ad.duration),
            ),
        };

        Ok(Self {
            segment,
            assets,
            profile: EncodingProfile::default(),
            ffmpeg: opts
                .ffmpeg
                .clone()
                .or(file.ffmpeg)
                .unwrap_or_else(|| DEFAULT_FFMPEG.to_string()),
            ffprobe: opts
                .ffprobe
                .clone()
                .or(file.ffprobe)
                .unwrap_or_else(|| DEFAULT_FFPROBE.to_string()),
            seed: opts.seed,
            dry_run: opts.dry_run,
            log_level: opts
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: opts.log_format,
        })
    }
}
