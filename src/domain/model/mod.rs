// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{HoneypotError, HoneypotResult};

/// Shortest segment that still leaves room for a 10 second defect plus lead-in
pub const MIN_SEGMENT_DURATION: f64 = 11.0;

/// Segment duration used when neither CLI nor config file sets one
pub const DEFAULT_SEGMENT_DURATION: f64 = 120.0;

/// Handler name muxers write for audio tracks by default
pub const DEFAULT_HANDLER_NAME: &str = "SoundHandler";

/// Stream codec type as reported by the prober
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecType {
    Video,
    Audio,
    Other(String),
}

impl CodecType {
    /// Parse the prober's `codec_type` field
    pub fn parse(value: &str) -> Self {
        match value {
            "video" => CodecType::Video,
            "audio" => CodecType::Audio,
            other => CodecType::Other(other.to_string()),
        }
    }
}

/// One stream of a probed file
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    /// Absolute stream index inside the container
    pub index: usize,
    pub codec_type: CodecType,
    /// Language tag, empty when the stream carries none
    pub language: String,
    /// Handler name tag, empty when the stream carries none
    pub handler_name: String,
    /// Default disposition flag
    pub is_default: bool,
}

impl StreamInfo {
    pub fn is_audio(&self) -> bool {
        self.codec_type == CodecType::Audio
    }

    /// Whether the handler name must be written explicitly to survive re-muxing
    pub fn has_custom_handler(&self) -> bool {
        self.handler_name != DEFAULT_HANDLER_NAME
    }
}

/// Metadata for one input file
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Path the file was probed from
    pub path: PathBuf,
    /// File name as reported by the prober
    pub filename: String,
    /// Overall format duration in seconds
    pub duration: f64,
    pub streams: Vec<StreamInfo>,
}

impl ProbeResult {
    /// Audio streams in container order
    pub fn audio_streams(&self) -> impl Iterator<Item = &StreamInfo> {
        self.streams.iter().filter(|s| s.is_audio())
    }

    /// Fail unless the file is long enough to hold one segment
    pub fn ensure_covers(&self, segment_duration: f64) -> HoneypotResult<()> {
        if self.duration < segment_duration {
            return Err(HoneypotError::InputTooShort {
                duration: self.duration,
                segment: segment_duration,
            });
        }
        Ok(())
    }

    /// Base file name for log output
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.filename.clone())
    }
}

/// Kind of defect injected into an output segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectKind {
    VisualAd,
    AudioAd,
    Silence,
    Desync,
}

impl DefectKind {
    /// All kinds in processing order
    pub const ALL: [DefectKind; 4] = [
        DefectKind::VisualAd,
        DefectKind::AudioAd,
        DefectKind::Silence,
        DefectKind::Desync,
    ];

    /// Suffix replacing the input extension
    pub fn output_suffix(&self) -> &'static str {
        match self {
            DefectKind::VisualAd => "_visual_ad.mp4",
            DefectKind::AudioAd => "_audio_ad.mp4",
            DefectKind::Silence => "_silence.mp4",
            DefectKind::Desync => "_desync.mp4",
        }
    }

    /// Output path next to the input: extension replaced by the defect suffix
    pub fn output_path(&self, input: &Path) -> HoneypotResult<PathBuf> {
        let stem = input
            .file_stem()
            .ok_or_else(|| HoneypotError::InvalidPath {
                path: input.display().to_string(),
            })?
            .to_string_lossy();
        Ok(input.with_file_name(format!("{}{}", stem, self.output_suffix())))
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefectKind::VisualAd => "visual ad",
            DefectKind::AudioAd => "audio ad",
            DefectKind::Silence => "silence",
            DefectKind::Desync => "desync",
        };
        write!(f, "{}", name)
    }
}

/// Which defect kinds a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefectToggles {
    pub visual_ad: bool,
    pub audio_ad: bool,
    pub silence: bool,
    pub desync: bool,
}

impl Default for DefectToggles {
    fn default() -> Self {
        Self {
            visual_ad: true,
            audio_ad: true,
            silence: true,
            desync: true,
        }
    }
}

impl DefectToggles {
    pub fn is_enabled(&self, kind: DefectKind) -> bool {
        match kind {
            DefectKind::VisualAd => self.visual_ad,
            DefectKind::AudioAd => self.audio_ad,
            DefectKind::Silence => self.silence,
            DefectKind::Desync => self.desync,
        }
    }

    /// Enabled kinds in processing order
    pub fn enabled(&self) -> Vec<DefectKind> {
        DefectKind::ALL
            .into_iter()
            .filter(|k| self.is_enabled(*k))
            .collect()
    }
}

/// Run-wide segment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentConfig {
    /// Output segment length in seconds
    pub segment_duration: f64,
    pub toggles: DefectToggles,
}

impl SegmentConfig {
    /// Create a configuration, rejecting segments shorter than the minimum
    pub fn new(segment_duration: f64, toggles: DefectToggles) -> HoneypotResult<Self> {
        if segment_duration.is_nan() || segment_duration < MIN_SEGMENT_DURATION {
            return Err(HoneypotError::InvalidSegmentDuration {
                duration: segment_duration,
                minimum: MIN_SEGMENT_DURATION,
            });
        }
        Ok(Self {
            segment_duration,
            toggles,
        })
    }
}

/// External media file used as overlay or mix source
#[derive(Debug, Clone, PartialEq)]
pub struct DefectAsset {
    pub path: PathBuf,
    /// Known duration of the asset in seconds
    pub duration: f64,
}

impl DefectAsset {
    pub fn new(path: impl Into<PathBuf>, duration: f64) -> Self {
        Self {
            path: path.into(),
            duration,
        }
    }
}

/// The two assets every run references
#[derive(Debug, Clone, PartialEq)]
pub struct DefectAssets {
    pub visual_ad: DefectAsset,
    pub audio_ad: DefectAsset,
}

impl Default for DefectAssets {
    fn default() -> Self {
        Self {
            visual_ad: DefectAsset::new("./media/1xbet_logo_white_10sec.mov", 10.0),
            audio_ad: DefectAsset::new("./media/yandex_eda_10sec.mp4", 10.0),
        }
    }
}

/// A fully built external-tool invocation for one defect segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    pub kind: DefectKind,
    /// Seek position in the source, seconds
    pub segment_start: f64,
    /// Defect start relative to the segment, absent for desync
    pub defect_offset: Option<u32>,
    pub output_path: PathBuf,
    pub args: Vec<String>,
}
