//! Defect segment builders
//!
//! Each builder turns a probed source into a [`SegmentPlan`]: where the
//! segment starts, where the defect sits inside it, and the full ffmpeg
//! argument list that renders it.

use rand::RngCore;

use crate::domain::model::{DefectAssets, DefectKind, ProbeResult, SegmentConfig, SegmentPlan};
use crate::error::HoneypotResult;
use crate::ffmpeg::EncodingProfile;

pub mod audio_ad;
pub mod desync;
pub mod silence;
pub mod visual_ad;

pub use audio_ad::AudioAdBuilder;
pub use desync::DesyncBuilder;
pub use silence::SilenceBuilder;
pub use visual_ad::VisualAdBuilder;

/// Everything a builder reads; nothing here is mutated during a run
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub probe: &'a ProbeResult,
    pub config: &'a SegmentConfig,
    pub assets: &'a DefectAssets,
    pub profile: &'a EncodingProfile,
}

/// Builds the invocation for one defect kind
pub trait SegmentBuilder {
    fn kind(&self) -> DefectKind;

    /// Draw the random placement from `rng` and assemble the plan
    fn build(&self, ctx: &BuildContext<'_>, rng: &mut dyn RngCore) -> HoneypotResult<SegmentPlan>;
}

/// Builder responsible for `kind`
pub fn builder_for(kind: DefectKind) -> Box<dyn SegmentBuilder> {
    match kind {
        DefectKind::VisualAd => Box::new(VisualAdBuilder),
        DefectKind::AudioAd => Box::new(AudioAdBuilder),
        DefectKind::Silence => Box::new(SilenceBuilder),
        DefectKind::Desync => Box::new(DesyncBuilder),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;

    use crate::domain::model::*;

    pub fn stream(index: usize, codec_type: CodecType, language: &str, handler: &str, is_default: bool) -> StreamInfo {
        StreamInfo {
            index,
            codec_type,
            language: language.to_string(),
            handler_name: handler.to_string(),
            is_default,
        }
    }

    /// 300 s source with one video stream and two audio streams (indices 2 and 3)
    pub fn probe() -> ProbeResult {
        ProbeResult {
            path: PathBuf::from("/media/in/clip.mov"),
            filename: "/media/in/clip.mov".to_string(),
            duration: 300.0,
            streams: vec![
                stream(0, CodecType::Video, "", "VideoHandler", true),
                stream(1, CodecType::Other("data".to_string()), "", "", false),
                stream(2, CodecType::Audio, "eng", DEFAULT_HANDLER_NAME, true),
                stream(3, CodecType::Audio, "rus", "Russian dub", false),
            ],
        }
    }

    pub fn config() -> SegmentConfig {
        SegmentConfig::new(120.0, DefectToggles::default()).unwrap()
    }

    pub fn assets() -> DefectAssets {
        DefectAssets {
            visual_ad: DefectAsset::new("/assets/logo.mov", 10.0),
            audio_ad: DefectAsset::new("/assets/jingle.mp4", 10.0),
        }
    }

    /// Position of the argument following `flag`
    pub fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }
}
