//! Visual ad overlay segment

use rand::RngCore;
use tracing::info;

use super::{BuildContext, SegmentBuilder};
use crate::domain::model::{DefectKind, SegmentPlan};
use crate::domain::timing::{defect_offset, segment_start};
use crate::error::HoneypotResult;
use crate::ffmpeg::FfmpegCommand;
use crate::filter::{from_time, timestamp, Filter, FilterChain, FilterGraph};

/// Overlays the visual ad in the bottom-right corner from the defect offset on
pub struct VisualAdBuilder;

impl VisualAdBuilder {
    fn overlay_graph(offset: f64) -> FilterGraph {
        let delayed = FilterChain::new()
            .input("1:v")
            .filter(Filter::new("setpts").arg(format!("PTS+{}/TB", timestamp(offset))))
            .output("o");

        let overlay = FilterChain::new()
            .input("0:v")
            .input("o")
            .filter(
                Filter::new("overlay")
                    .enable(from_time(offset))
                    .option("x", "main_w-overlay_w-main_w/20")
                    .option("y", "main_h-overlay_h")
                    .option("eof_action", "pass"),
            )
            .filter(Filter::new("format").arg("yuv420p"))
            .output("v");

        FilterGraph::new().chain(delayed).chain(overlay)
    }
}

impl SegmentBuilder for VisualAdBuilder {
    fn kind(&self) -> DefectKind {
        DefectKind::VisualAd
    }

    fn build(&self, ctx: &BuildContext<'_>, rng: &mut dyn RngCore) -> HoneypotResult<SegmentPlan> {
        let segment = ctx.config.segment_duration;
        let asset = &ctx.assets.visual_ad;

        let start = segment_start(rng, ctx.probe.duration, segment);
        let offset = defect_offset(rng, segment, asset.duration);
        let output_path = self.kind().output_path(&ctx.probe.path)?;

        info!(
            file = %ctx.probe.display_name(),
            segment_start = start,
            segment_duration = segment,
            defect_offset = offset,
            "Making visual ad segment"
        );

        let args = FfmpegCommand::new(ctx.profile)
            .seek(start)
            .input(&ctx.probe.path)
            .input(&asset.path)
            .filter_complex(&Self::overlay_graph(offset as f64))
            .map("[v]")
            .video_profile()
            .audio_codec()
            .map("0:a")
            .audio_rate()
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
