//! Silence window segment

use rand::RngCore;
use tracing::info;

use super::{BuildContext, SegmentBuilder};
use crate::domain::model::{DefectKind, SegmentPlan};
use crate::domain::timing::{defect_offset, segment_start};
use crate::error::HoneypotResult;
use crate::ffmpeg::FfmpegCommand;
use crate::filter::{between, Filter, FilterChain};

/// Length of the muted window, seconds
pub const SILENCE_WINDOW: f64 = 10.0;

/// Mutes all audio for [`SILENCE_WINDOW`] seconds from the defect offset
pub struct SilenceBuilder;

impl SilenceBuilder {
    fn mute_chain(offset: f64) -> FilterChain {
        FilterChain::new().filter(
            Filter::new("volume")
                .arg("0")
                .enable(between(offset, offset + SILENCE_WINDOW)),
        )
    }
}

impl SegmentBuilder for SilenceBuilder {
    fn kind(&self) -> DefectKind {
        DefectKind::Silence
    }

    fn build(&self, ctx: &BuildContext<'_>, rng: &mut dyn RngCore) -> HoneypotResult<SegmentPlan> {
        let segment = ctx.config.segment_duration;

        let start = segment_start(rng, ctx.probe.duration, segment);
        // The audio ad length only bounds the offset range here.
        let offset = defect_offset(rng, segment, ctx.assets.audio_ad.duration);
        let output_path = self.kind().output_path(&ctx.probe.path)?;

        info!(
            file = %ctx.probe.display_name(),
            segment_start = start,
            segment_duration = segment,
            defect_offset = offset,
            "Making silence segment"
        );

        let args = FfmpegCommand::new(ctx.profile)
            .seek(start)
            .input(&ctx.probe.path)
            .map("0:v")
            .video_profile()
            .audio_codec()
            .map("0:a")
            .audio_rate()
            .audio_filter(&Self::mute_chain(offset as f64))
            .duration(segment)
            .output(&output_path);

        Ok(SegmentPlan {
            kind: self.kind(),
            segment_start: start,
            defect_offset: Some(offset),
            output_path,
            args,
        })
    }
}
