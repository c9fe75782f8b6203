//! Audio ad mix segment

use rand::RngCore;
use tracing::{debug, info};

use super::{BuildContext, SegmentBuilder};
use crate::domain::model::{DefectKind, SegmentPlan, StreamInfo};
use crate::domain::timing::{defect_offset, segment_start};
use crate::error::{HoneypotError, HoneypotResult};
use crate::ffmpeg::{AudioTrackMetadata, FfmpegCommand};
use crate::filter::{between, Filter, FilterChain, FilterGraph};

/// Gain applied to the original track while the ad plays
const DUCK_VOLUME: f64 = 0.25;
/// Gain applied to the ad
const AD_VOLUME: f64 = 1.5;
/// amix dropout transition, seconds
const DROPOUT_TRANSITION: u32 = 2;

/// Mixes the audio ad into every audio track of the source
pub struct AudioAdBuilder;

impl AudioAdBuilder {
    /// Label of the mixed output for source stream `index`
    fn mix_label(index: usize) -> String {
        format!("mix{}", index)
    }

    /// Duck, boost and mix chains for one source audio stream
    fn mix_chains(stream: &StreamInfo, window_start: f64, window_end: f64) -> [FilterChain; 3] {
        let original = format!("a{}", stream.index);
        let ad = format!("ad{}", stream.index);

        [
            FilterChain::new()
                .input(format!("0:{}", stream.index))
                .filter(
                    Filter::new("volume")
                        .arg(DUCK_VOLUME.to_string())
                        .enable(between(window_start, window_end)),
                )
                .output(original.clone()),
            FilterChain::new()
                .input("1:a")
                .filter(Filter::new("volume").arg(AD_VOLUME.to_string()))
                .output(ad.clone()),
            FilterChain::new()
                .input(ad)
                .input(original)
                .filter(
                    Filter::new("amix")
                        .option("inputs", 2)
                        .option("duration", "longest")
                        .option("dropout_transition", DROPOUT_TRANSITION),
                )
                .output(Self::mix_label(stream.index)),
        ]
    }
}

impl SegmentBuilder for AudioAdBuilder {
    fn kind(&self) -> DefectKind {
        DefectKind::AudioAd
    }

    fn build(&self, ctx: &BuildContext<'_>, rng: &mut dyn RngCore) -> HoneypotResult<SegmentPlan> {
        let segment = ctx.config.segment_duration;
        let asset = &ctx.assets.audio_ad;

        let streams: Vec<&StreamInfo> = ctx.probe.audio_streams().collect();
        if streams.is_empty() {
            return Err(HoneypotError::NoAudioStreams {
                path: ctx.probe.path.display().to_string(),
            });
        }

        let start = segment_start(rng, ctx.probe.duration, segment);
        let offset = defect_offset(rng, segment, asset.duration);
        let output_path = self.kind().output_path(&ctx.probe.path)?;

        info!(
            file = %ctx.probe.display_name(),
            segment_start = start,
            segment_duration = segment,
            defect_offset = offset,
            audio_tracks = streams.len(),
            "Making audio ad segment"
        );

        let window_start = offset as f64;
        let window_end = window_start + asset.duration;
        let graph = streams.iter().fold(FilterGraph::new(), |graph, stream| {
            graph.extend(Self::mix_chains(stream, window_start, window_end))
        });

        let mut cmd = FfmpegCommand::new(ctx.profile)
            .seek(start)
            .input(&ctx.probe.path)
            .input_offset(window_start)
            .input(&asset.path)
            .filter_complex(&graph)
            .map("0:v")
            .video_profile()
            .arg("-async")
            .arg("1");

        for (track, stream) in streams.iter().enumerate() {
            let metadata = AudioTrackMetadata {
                language: stream.language.clone(),
                is_default: stream.is_default,
                handler_name: stream
                    .has_custom_handler()
                    .then(|| stream.handler_name.clone()),
            };
            debug!(track, source_index = stream.index, language = %metadata.language, "Mapping mixed audio track");

            cmd = cmd
                .map(format!("[{}]", Self::mix_label(stream.index)))
                .audio_codec()
                .audio_rate()
                .audio_track_metadata(track, &metadata);
        }

        let args = cmd.duration(segment).output(&output_path);

        Ok(SegmentPlan {
            kind: self.kind(),
            segment_start: start,
            defect_offset: Some(offset),
            output_path,
            args,
        })
    }
}
