//! Audio/video desync segment

use rand::RngCore;
use tracing::info;

use super::{BuildContext, SegmentBuilder};
use crate::domain::model::{DefectKind, SegmentPlan};
use crate::domain::timing::segment_start;
use crate::error::HoneypotResult;
use crate::ffmpeg::FfmpegCommand;

/// Audio lag behind video, seconds
pub const DESYNC_OFFSET: f64 = 1.0;

/// Takes video from the source and audio from a second, delayed read of it
pub struct DesyncBuilder;

impl SegmentBuilder for DesyncBuilder {
    fn kind(&self) -> DefectKind {
        DefectKind::Desync
    }

    fn build(&self, ctx: &BuildContext<'_>, rng: &mut dyn RngCore) -> HoneypotResult<SegmentPlan> {
        let segment = ctx.config.segment_duration;
        let start = segment_start(rng, ctx.probe.duration, segment);
        let output_path = self.kind().output_path(&ctx.probe.path)?;

        info!(
            file = %ctx.probe.display_name(),
            segment_start = start,
            segment_duration = segment,
            "Making desynced segment"
        );

        let args = FfmpegCommand::new(ctx.profile)
            .seek(start)
            .input(&ctx.probe.path)
            .seek(start)
            .input_offset(DESYNC_OFFSET)
            .input(&ctx.probe.path)
            .map("0:v")
            .video_profile()
            .audio_codec()
            .map("1:a")
            .audio_rate()
            .duration(segment)
            .output(&output_path);

        Ok(SegmentPlan {
            kind: self.kind(),
            segment_start: start,
            defect_offset: None,
            output_path,
            args,
        })
    }
}
